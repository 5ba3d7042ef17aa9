use crate::common::command::{
    gitlet_commit, init_repository_dir, repository_dir, run_gitlet_command,
};
use crate::common::file::{FileSpec, generate_file_spec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn staged_section(dir: &std::path::Path) -> Result<String, Box<dyn std::error::Error>> {
    let output = run_gitlet_command(dir, &["status"]).output()?;
    let stdout = String::from_utf8(output.stdout)?;

    Ok(stdout
        .split("=== Staged Files ===\n")
        .nth(1)
        .unwrap_or_default()
        .lines()
        .take_while(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

#[rstest]
fn add_new_file_stages_it(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let file_spec = generate_file_spec(repository_dir.path());
    let file_name = file_spec
        .path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or("generated file has no name")?;
    write_file(file_spec);

    run_gitlet_command(repository_dir.path(), &["add", &file_name])
        .assert()
        .success()
        .stdout("");

    assert_eq!(staged_section(repository_dir.path())?, file_name);

    Ok(())
}

#[rstest]
fn add_missing_file_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["add", "missing.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");

    Ok(())
}

#[rstest]
fn add_unchanged_tracked_file_stages_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(staged_section(init_repository_dir.path())?, "");

    Ok(())
}

#[rstest]
fn add_nested_file_by_relative_path(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "changed".to_string(),
    ));

    run_gitlet_command(repository_dir.path(), &["add", "./a/2.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(staged_section(repository_dir.path())?, "a/2.txt");

    Ok(())
}

#[rstest]
fn add_after_rm_cancels_the_removal(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_gitlet_command(repository_dir.path(), &["rm", "1.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    run_gitlet_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success()
        .stdout("");

    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Staged Files ===\n\n=== Removed Files ===\n\n",
        ));

    Ok(())
}

#[cfg(unix)]
#[rstest]
fn add_file_with_line_break_in_name(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;
    let dir = repository_dir.path();
    write_file(FileSpec::new(dir.join("a\nb"), "odd".to_string()));

    run_gitlet_command(dir, &["add", "a\nb"])
        .assert()
        .success()
        .stdout("");
    gitlet_commit(dir, "Odd name")
        .assert()
        .success()
        .stdout("");

    run_gitlet_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Odd name\n"));
    std::fs::write(dir.join("a\nb"), "scribbled")?;
    run_gitlet_command(dir, &["checkout", "--", "a\nb"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(std::fs::read_to_string(dir.join("a\nb"))?, "odd");

    Ok(())
}

#[rstest]
fn add_file_outside_the_repository_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let outer = repository_dir.path();
    let inner = outer.join("repo");
    std::fs::create_dir_all(&inner)?;
    write_file(FileSpec::new(outer.join("outside.txt"), "keep me".to_string()));

    run_gitlet_command(&inner, &["init"]).assert().success();
    run_gitlet_command(&inner, &["branch", "other"])
        .assert()
        .success();

    run_gitlet_command(&inner, &["add", "../outside.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");
    gitlet_commit(&inner, "Nothing staged")
        .assert()
        .success()
        .stdout("No changes added to the commit.\n");
    run_gitlet_command(&inner, &["checkout", "other"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(outer.join("outside.txt"))?,
        "keep me"
    );

    Ok(())
}

#[rstest]
fn add_repository_metadata_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["add", ".gitlet/state"])
        .assert()
        .success()
        .stdout("File does not exist.\n");

    Ok(())
}
