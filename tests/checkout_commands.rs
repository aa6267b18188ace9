use crate::common::command::{
    EMPTY_STATUS, committed_repository_dir, find_commit_id, gitlet_add, gitlet_commit,
    head_commit_id, run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

mod common;

/// `master` with two commits ("add a and b", then "change a" setting a.txt
/// to "y"), and a branch `feat` left at the first one
#[fixture]
fn two_commit_repository_dir(committed_repository_dir: TempDir) -> TempDir {
    let dir = committed_repository_dir.path();
    run_gitlet_command(dir, &["branch", "feat"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "y".to_string()));
    gitlet_add(dir, "a.txt");
    gitlet_commit(dir, "change a").assert().success();

    committed_repository_dir
}

#[rstest]
fn checkout_file_restores_the_committed_version(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "scribbles".to_string()));

    run_gitlet_command(dir, &["checkout", "--", "a.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("a.txt")), "x");
}

#[rstest]
fn checkout_file_recreates_a_deleted_nested_file(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    std::fs::remove_dir_all(dir.join("dir")).unwrap();

    run_gitlet_command(dir, &["checkout", "--", "dir/b.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("dir").join("b.txt")), "b");
}

#[rstest]
fn checkout_file_from_an_abbreviated_commit(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir.path();
    let first = find_commit_id(dir, "add a and b");

    run_gitlet_command(dir, &["checkout", &first[..6], "--", "a.txt"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("a.txt")), "x");
    // restoring a file does not stage it
    assert_eq!(head_commit_id(dir), find_commit_id(dir, "change a"));
}

#[rstest]
fn checkout_file_missing_from_the_commit_is_refused(committed_repository_dir: TempDir) {
    run_gitlet_command(committed_repository_dir.path(), &["checkout", "--", "nope.txt"])
        .assert()
        .success()
        .stdout("File does not exist in that commit.\n");
}

#[rstest]
#[case("0000000000000000000000000000000000000000")]
#[case("abcdef")]
#[case("abc")]
fn checkout_file_from_an_unknown_commit_is_refused(
    committed_repository_dir: TempDir,
    #[case] commit: &str,
) {
    run_gitlet_command(committed_repository_dir.path(), &["checkout", commit, "--", "a.txt"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}

#[rstest]
fn checkout_branch_switches_the_working_tree(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir.path();

    run_gitlet_command(dir, &["checkout", "feat"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_file(&dir.join("a.txt")), "x");
    assert_eq!(head_commit_id(dir), find_commit_id(dir, "add a and b"));

    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    assert_eq!(read_file(&dir.join("a.txt")), "y");
}

#[rstest]
fn checkout_branch_deletes_files_the_target_does_not_track(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir.path();
    write_file(FileSpec::new(dir.join("only_master.txt"), "m".to_string()));
    gitlet_add(dir, "only_master.txt");
    gitlet_commit(dir, "master file").assert().success();
    // never staged or committed anywhere
    write_file(FileSpec::new(dir.join("scratch.txt"), "scratch".to_string()));

    run_gitlet_command(dir, &["checkout", "feat"]).assert().success();

    assert!(!dir.join("only_master.txt").exists());
    assert!(!dir.join("scratch.txt").exists());
}

#[rstest]
fn checkout_branch_clears_the_staging_area(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir.path();
    write_file(FileSpec::new(dir.join("dir").join("b.txt"), "staged".to_string()));
    gitlet_add(dir, "dir/b.txt");

    run_gitlet_command(dir, &["checkout", "feat"]).assert().success();

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*feat\nmaster\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n",
        );
}

#[rstest]
fn checkout_refuses_to_clobber_untracked_files(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir.path();
    run_gitlet_command(dir, &["checkout", "feat"]).assert().success();
    write_file(FileSpec::new(dir.join("new.txt"), "feat version".to_string()));
    gitlet_add(dir, "new.txt");
    gitlet_commit(dir, "feat adds new").assert().success();
    run_gitlet_command(dir, &["checkout", "master"]).assert().success();
    write_file(FileSpec::new(dir.join("new.txt"), "unsaved work".to_string()));

    run_gitlet_command(dir, &["checkout", "feat"])
        .assert()
        .success()
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(read_file(&dir.join("new.txt")), "unsaved work");
    assert_eq!(head_commit_id(dir), find_commit_id(dir, "change a"));
}

#[rstest]
fn checkout_unknown_branch_is_refused(committed_repository_dir: TempDir) {
    run_gitlet_command(committed_repository_dir.path(), &["checkout", "nope"])
        .assert()
        .success()
        .stdout("No such branch exists.\n");
}

#[rstest]
fn checkout_current_branch_is_refused(committed_repository_dir: TempDir) {
    run_gitlet_command(committed_repository_dir.path(), &["checkout", "master"])
        .assert()
        .success()
        .stdout("No need to checkout the current branch.\n");
}

#[rstest]
fn reset_moves_the_current_branch(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir.path();
    let first = find_commit_id(dir, "add a and b");
    write_file(FileSpec::new(dir.join("a.txt"), "staged".to_string()));
    gitlet_add(dir, "a.txt");

    run_gitlet_command(dir, &["reset", &first[..8]])
        .assert()
        .success()
        .stdout("");

    assert_eq!(head_commit_id(dir), first);
    assert_eq!(read_file(&dir.join("a.txt")), "x");
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\nfeat\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n",
        );
}

#[rstest]
fn reset_to_an_unknown_commit_is_refused(committed_repository_dir: TempDir) {
    run_gitlet_command(committed_repository_dir.path(), &["reset", "123456"])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}

#[rstest]
fn reset_forward_again_restores_later_files(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir.path();
    let second = head_commit_id(dir);
    run_gitlet_command(dir, &["reset", &find_commit_id(dir, "add a and b")])
        .assert()
        .success();

    run_gitlet_command(dir, &["reset", &second]).assert().success();

    assert_eq!(read_file(&dir.join("a.txt")), "y");
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(EMPTY_STATUS.replace("*master\n", "feat\n*master\n")));
}
