use crate::common::command::{commit_file, init_repository_dir, run_gitlet_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_branch_replaces_working_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let dir = repository_dir.path();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "1.txt", "changed", "Change one");
    commit_file(dir, "new.txt", "new", "Add new");

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("1.txt")), "one");
    assert!(!dir.join("new.txt").exists());

    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("1.txt")), "changed");
    assert_eq!(read_file(&dir.join("new.txt")), "new");

    Ok(())
}

#[rstest]
fn checkout_branch_leaves_untracked_files_alone(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let dir = repository_dir.path();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("notes.txt"), "notes".to_string()));

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("notes.txt")), "notes");

    Ok(())
}

#[rstest]
fn checkout_branch_refuses_to_overwrite_untracked_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let dir = repository_dir.path();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    commit_file(dir, "x.txt", "tracked on other", "Add x");
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    assert!(!dir.join("x.txt").exists());

    write_file(FileSpec::new(dir.join("x.txt"), "mine".to_string()));
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it or add it first.\n");

    assert_eq!(read_file(&dir.join("x.txt")), "mine");
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== Branches ===\n*master\nother\n\n",
        ));

    Ok(())
}

#[rstest]
fn checkout_branch_clears_the_staging_area(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let dir = repository_dir.path();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    std::fs::write(dir.join("1.txt"), "staged change")?;
    run_gitlet_command(dir, &["add", "1.txt"]).assert().success();

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("1.txt")), "one");
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));

    Ok(())
}

#[rstest]
fn checkout_current_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout("No need to checkout the current branch.\n");

    Ok(())
}

#[rstest]
fn checkout_missing_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["checkout", "nowhere"])
        .assert()
        .success()
        .stdout("No such branch exists.\n");

    Ok(())
}
