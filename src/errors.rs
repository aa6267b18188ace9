//! User-facing failure categories
//!
//! Every condition that the tool reports back to the user (as opposed to an
//! unexpected I/O failure) is one variant of [`VcsError`]. The `Display` text of
//! each variant is the exact line printed by the binary.
//!
//! Library code raises these through `anyhow` so that context can still be
//! attached to I/O errors; callers recover the category with
//! `err.downcast_ref::<VcsError>()`.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VcsError {
    #[error("Please enter a command.")]
    NoCommand,

    #[error("No command with that name exists.")]
    UnknownCommand,

    #[error("Incorrect operands.")]
    IncorrectOperands,

    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    /// The working-tree file named by an `add` does not exist.
    #[error("File does not exist.")]
    FileNotFound,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    /// A full digest or prefix did not name any stored commit.
    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    /// Raised by branch removal and merge.
    #[error("A branch with that name does not exist.")]
    NoSuchBranch,

    /// Raised by branch checkout.
    #[error("No such branch exists.")]
    NoSuchCheckoutBranch,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    /// A working file untracked by the current commit would be clobbered by
    /// the destination commit.
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("No blob with id {0} exists.")]
    BlobNotFound(ObjectId),

    #[error("Corrupt object {0}: {1}")]
    CorruptObject(ObjectId, String),
}

/// Extract the user-facing category from an error chain, if there is one.
pub fn category(error: &anyhow::Error) -> Option<&VcsError> {
    error.downcast_ref::<VcsError>()
}
