use crate::common::command::{
    commit_file, find_commit_id, gitlet_commit, init_repository_dir, log_messages,
    run_gitlet_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_combines_changes_from_both_branches(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let dir = repository_dir.path();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "1.txt", "uno", "Master changes one");
    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    commit_file(dir, "new.txt", "new", "Other adds new");
    run_gitlet_command(dir, &["rm", "a/2.txt"]).assert().success();
    gitlet_commit(dir, "Other removes two").assert().success();
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("1.txt")), "uno");
    assert_eq!(read_file(&dir.join("new.txt")), "new");
    assert!(!dir.join("a").join("2.txt").exists());

    let master_id = find_commit_id(dir, "Master changes one")?;
    let other_id = find_commit_id(dir, "Other removes two")?;
    let merge_entry = format!("Merge: {} {}\n", &master_id[..7], &other_id[..7]);
    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(merge_entry));
    assert_eq!(
        log_messages(dir)?,
        vec![
            "Merged other into master.",
            "Master changes one",
            "Initial commit",
            "initial commit"
        ]
    );
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*master\nother\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Untracked Files ===\n\n",
        );

    Ok(())
}

#[rstest]
fn merge_conflict_writes_both_versions(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let dir = repository_dir.path();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "1.txt", "a\n", "Master writes a");
    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    commit_file(dir, "1.txt", "b\n", "Other writes b");
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("1.txt")),
        "<<<<<<< HEAD\na\n=======\nb\n>>>>>>>\n"
    );
    assert_eq!(log_messages(dir)?[0], "Merged other into master.");

    Ok(())
}

#[rstest]
fn merge_conflict_with_deleted_side(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let dir = repository_dir.path();

    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    run_gitlet_command(dir, &["rm", "1.txt"]).assert().success();
    gitlet_commit(dir, "Master removes one").assert().success();
    run_gitlet_command(dir, &["checkout", "other"]).assert().success();
    commit_file(dir, "1.txt", "b\n", "Other writes b");
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();

    run_gitlet_command(dir, &["merge", "other"])
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("1.txt")),
        "<<<<<<< HEAD\n=======\nb\n>>>>>>>\n"
    );

    Ok(())
}
