use crate::artifacts::objects::commit::Commit;
use std::path::{Path, PathBuf};

/// Working files the destination commit would silently overwrite
///
/// A file is in the way when the current commit does not track it but the
/// destination does: its content was never saved anywhere.
pub fn untracked_in_the_way<'p>(
    workspace_files: &'p [PathBuf],
    current: &Commit,
    destination: &Commit,
) -> Vec<&'p Path> {
    workspace_files
        .iter()
        .map(PathBuf::as_path)
        .filter(|path| !current.tracks(path) && destination.tracks(path))
        .collect()
}
