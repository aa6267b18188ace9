use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Timestamp given to every commit made through [`gitlet_commit`]
pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

/// [`COMMIT_DATE`] as `log` prints it
pub const READABLE_COMMIT_DATE: &str = "Sun Jan 1 12:00:00 2023 +0000";

pub const EMPTY_STATUS: &str = "=== Branches ===\n*master\n\n\
    === Staged Files ===\n\n\
    === Removed Files ===\n\n\
    === Modifications Not Staged For Commit ===\n\n\
    === Untracked Files ===\n\n";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// A repository whose `master` has one commit tracking `a.txt` ("x") and
/// `dir/b.txt` ("b")
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("a.txt"), "x".to_string()));
    write_file(FileSpec::new(dir.join("dir").join("b.txt"), "b".to_string()));
    gitlet_add(dir, "a.txt");
    gitlet_add(dir, "dir/b.txt");
    gitlet_commit(dir, "add a and b").assert().success().stdout("");

    init_repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("GITLET_STAGE_CONFLICTS");
    cmd.env_remove("GITLET_COMMIT_DATE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_gitlet_command(dir, &["commit", message]);
    cmd.env("GITLET_COMMIT_DATE", COMMIT_DATE);
    cmd
}

pub fn gitlet_merge(dir: &Path, branch: &str) -> Command {
    let mut cmd = run_gitlet_command(dir, &["merge", branch]);
    cmd.env("GITLET_COMMIT_DATE", COMMIT_DATE);
    cmd
}

/// Stage a file, asserting the command printed nothing
pub fn gitlet_add(dir: &Path, file: &str) {
    run_gitlet_command(dir, &["add", file])
        .assert()
        .success()
        .stdout("");
}

pub fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.output().expect("Failed to run gitlet");
    String::from_utf8(output.stdout).expect("gitlet printed invalid UTF-8")
}

/// ID of the current branch's tip, read from the first `log` entry
pub fn head_commit_id(dir: &Path) -> String {
    stdout_of(run_gitlet_command(dir, &["log"]))
        .lines()
        .find_map(|line| line.strip_prefix("commit "))
        .expect("log printed no commit")
        .to_string()
}

/// ID of the only commit with the given message
pub fn find_commit_id(dir: &Path, message: &str) -> String {
    let output = stdout_of(run_gitlet_command(dir, &["find", message]));
    let ids = output.lines().collect::<Vec<_>>();
    assert_eq!(ids.len(), 1, "expected one commit with message {:?}", message);

    ids[0].to_string()
}

/// The `file` lines of a stored commit, as `(blob-id, path)` pairs
pub fn commit_files(dir: &Path, commit_id: &str) -> Vec<(String, String)> {
    stdout_of(run_gitlet_command(dir, &["cat-file", commit_id]))
        .lines()
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.strip_prefix("file "))
        .filter_map(|line| line.split_once(' '))
        .map(|(oid, path)| (oid.to_string(), path.to_string()))
        .collect()
}

/// Parent IDs of a stored commit, first parent first
pub fn commit_parents(dir: &Path, commit_id: &str) -> Vec<String> {
    stdout_of(run_gitlet_command(dir, &["cat-file", commit_id]))
        .lines()
        .take_while(|line| !line.is_empty())
        .filter_map(|line| {
            line.strip_prefix("parent ")
                .or_else(|| line.strip_prefix("merge "))
        })
        .map(str::to_string)
        .collect()
}
