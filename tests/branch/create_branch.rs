use crate::common::command::{init_repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn create_branch_keeps_current_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_gitlet_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success()
        .stdout("");

    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== Branches ===\nfeature\n*master\n\n",
        ));

    Ok(())
}

#[rstest]
fn create_existing_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_gitlet_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");

    run_gitlet_command(repository_dir.path(), &["branch", "master"])
        .assert()
        .success()
        .stdout("A branch with that name already exists.\n");

    Ok(())
}

#[rstest]
#[case::starts_with_dot(".branch")]
#[case::ends_with_lock("branch.lock")]
#[case::consecutive_dots("feature..branch")]
#[case::ends_with_slash("branch/")]
#[case::asterisk("feature*branch")]
#[case::colon("feature:branch")]
#[case::space("feature branch")]
fn create_branch_with_invalid_name(
    init_repository_dir: TempDir,
    #[case] branch_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_gitlet_command(repository_dir.path(), &["branch", branch_name])
        .assert()
        .success()
        .stdout(format!("Invalid branch name: {}\n", branch_name));

    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Branches ===\n*master\n\n"));

    Ok(())
}

#[rstest]
fn create_branch_with_hierarchical_name(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_gitlet_command(repository_dir.path(), &["branch", "feature/login"])
        .assert()
        .success()
        .stdout("");
    run_gitlet_command(repository_dir.path(), &["checkout", "feature/login"])
        .assert()
        .success()
        .stdout("");

    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== Branches ===\n*feature/login\nmaster\n\n",
        ));

    Ok(())
}
