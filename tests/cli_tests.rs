use crate::common::command::{init_repository_dir, repository_dir, run_gitlet_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn missing_command_is_reported(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &[])
        .assert()
        .success()
        .stdout("Please enter a command.\n");
}

#[rstest]
fn unknown_command_is_reported(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["push"])
        .assert()
        .success()
        .stdout("No command with that name exists.\n");
}

#[rstest]
#[case(&["add"])]
#[case(&["add", "a.txt", "b.txt"])]
#[case(&["init", "extra"])]
#[case(&["rm-branch"])]
#[case(&["checkout"])]
#[case(&["checkout", "abc123", "a.txt"])]
#[case(&["checkout", "abc123", "--", "a.txt", "b.txt"])]
fn wrong_operands_are_reported(init_repository_dir: TempDir, #[case] args: &[&str]) {
    run_gitlet_command(init_repository_dir.path(), args)
        .assert()
        .success()
        .stdout("Incorrect operands.\n");
}

#[rstest]
#[case(&["commit"])]
#[case(&["commit", ""])]
#[case(&["commit", "   "])]
fn blank_commit_message_is_reported(init_repository_dir: TempDir, #[case] args: &[&str]) {
    run_gitlet_command(init_repository_dir.path(), args)
        .assert()
        .success()
        .stdout("Please enter a commit message.\n");
}

#[rstest]
fn help_lists_the_commands(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("global-log"))
        .stdout(predicate::str::contains("rm-branch"));
}
