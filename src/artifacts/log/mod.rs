//! Commit history for `log` and `global-log`
//!
//! - `history`: first-parent walk from a commit back to the root
//! - `log_entry`: the text block printed for one commit

pub mod history;
pub mod log_entry;
