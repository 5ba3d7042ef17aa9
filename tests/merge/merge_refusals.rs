use crate::common::command::{commit_file, init_repository_dir, log_commit_ids, run_gitlet_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_with_staged_changes_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let dir = repository_dir.path();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    std::fs::write(dir.join("1.txt"), "pending")?;
    run_gitlet_command(dir, &["add", "1.txt"]).assert().success();

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("You have uncommitted changes.\n");

    Ok(())
}

#[rstest]
#[case::unknown("nowhere")]
#[case::invalid("no..where")]
fn merge_missing_branch_fails(
    init_repository_dir: TempDir,
    #[case] branch_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["merge", branch_name])
        .assert()
        .success()
        .stdout("A branch with that name does not exist.\n");

    Ok(())
}

#[rstest]
fn merge_current_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["merge", "master"])
        .assert()
        .success()
        .stdout("Cannot merge a branch with itself.\n");

    Ok(())
}

#[rstest]
fn merge_refuses_to_overwrite_untracked_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let dir = repository_dir.path();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "1.txt", "uno", "Master changes one");
    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    commit_file(dir, "x.txt", "theirs", "Other adds x");
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    write_file(FileSpec::new(dir.join("x.txt"), "mine".to_string()));
    let before = log_commit_ids(dir)?;

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(read_file(&dir.join("x.txt")), "mine");
    assert_eq!(log_commit_ids(dir)?, before);

    Ok(())
}
