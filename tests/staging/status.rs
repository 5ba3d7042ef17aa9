use crate::common::command::{init_repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn status_lists_every_section(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_gitlet_command(repository_dir.path(), &["branch", "other"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("3.txt"),
        "three".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("u.txt"),
        "untracked".to_string(),
    ));
    run_gitlet_command(repository_dir.path(), &["add", "3.txt"])
        .assert()
        .success();
    run_gitlet_command(repository_dir.path(), &["rm", "1.txt"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*master\nother\n\n\
             === Staged Files ===\n3.txt\n\n\
             === Removed Files ===\n1.txt\n\n\
             === Untracked Files ===\nu.txt\n\n",
        );

    Ok(())
}

#[rstest]
fn file_recreated_after_rm_is_untracked(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_gitlet_command(repository_dir.path(), &["rm", "1.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "back".to_string(),
    ));

    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n1.txt\n\n\
             === Untracked Files ===\n1.txt\n\n",
        );

    Ok(())
}
