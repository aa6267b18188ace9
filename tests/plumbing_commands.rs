use crate::common::command::{
    committed_repository_dir, head_commit_id, init_repository_dir, repository_dir,
    run_gitlet_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

const X_BLOB_ID: &str = "11f6ad8ec52a2984abaafd7c3b516503785c2072";

#[rstest]
fn hash_object_works_without_a_repository(repository_dir: TempDir) {
    let dir = repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "x".to_string()));

    run_gitlet_command(dir, &["hash-object", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", X_BLOB_ID)));

    assert!(!dir.join(".gitlet").exists());
}

#[rstest]
fn hash_object_write_needs_a_repository(repository_dir: TempDir) {
    let dir = repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "x".to_string()));

    run_gitlet_command(dir, &["hash-object", "-w", "a.txt"])
        .assert()
        .success()
        .stdout("Not in an initialized Gitlet directory.\n");
}

#[rstest]
fn hash_object_of_a_missing_file_is_refused(init_repository_dir: TempDir) {
    run_gitlet_command(init_repository_dir.path(), &["hash-object", "nope.txt"])
        .assert()
        .success()
        .stdout("File does not exist.\n");
}

#[rstest]
fn written_blobs_can_be_printed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a.txt"), "x".to_string()));

    run_gitlet_command(dir, &["hash-object", "--write", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", X_BLOB_ID)));

    assert!(dir.join(".gitlet").join("blobs").join(X_BLOB_ID).is_file());
    run_gitlet_command(dir, &["cat-file", X_BLOB_ID])
        .assert()
        .success()
        .stdout("x");
}

#[rstest]
fn cat_file_prints_the_root_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let root = head_commit_id(dir);

    run_gitlet_command(dir, &["cat-file", &root[..6]])
        .assert()
        .success()
        .stdout("date 0 +0000\n\ninitial commit\n");
}

#[rstest]
fn cat_file_lists_parent_and_files(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    let head = head_commit_id(dir);
    let log = String::from_utf8(
        run_gitlet_command(dir, &["global-log"]).output().unwrap().stdout,
    )
    .unwrap();
    let root = log
        .lines()
        .filter_map(|line| line.strip_prefix("commit "))
        .find(|oid| *oid != head)
        .unwrap()
        .to_string();

    run_gitlet_command(dir, &["cat-file", &head])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "parent {}\ndate 1672574400 +0000\nfile {} a.txt\nfile e9d71f5ee7c92d6dc9e92ffdad17b8bd49418f98 dir/b.txt\n\nadd a and b\n",
            root, X_BLOB_ID
        )));
}

#[rstest]
#[case("0000000000000000000000000000000000000000")]
#[case("fedcba")]
fn cat_file_of_an_unknown_object_is_refused(init_repository_dir: TempDir, #[case] oid: &str) {
    run_gitlet_command(init_repository_dir.path(), &["cat-file", oid])
        .assert()
        .success()
        .stdout("No commit with that id exists.\n");
}
