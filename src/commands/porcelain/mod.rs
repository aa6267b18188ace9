//! Porcelain commands
//!
//! The user-facing operations. Each loads the branch registry and staging
//! index it needs, works on them, and saves them before returning.
//!
//! ## Commands
//!
//! - `init`: Create a repository with a root commit on `master`
//! - `add` / `rm`: Stage files for addition or removal
//! - `commit`: Record the staged changes
//! - `log`: Show the current branch's history, every commit, or find one
//! - `status`: Show branches, staged changes and working-tree changes
//! - `checkout`: Restore files, switch branches, or reset to a commit
//! - `branch`: Create or delete branches
//! - `merge`: Merge another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod rm;
pub mod status;
