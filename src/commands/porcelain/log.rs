use crate::areas::repository::Repository;
use crate::artifacts::log::history::FirstParentHistory;
use crate::artifacts::log::log_entry::LogEntry;
use crate::errors::VcsError;
use std::io::Write;

impl Repository {
    /// Print the current branch's history, newest first, following first
    /// parents only
    pub fn log(&self) -> anyhow::Result<()> {
        let registry = self.load_registry()?;
        let history = FirstParentHistory::new(self.database(), registry.current_commit_oid().clone());

        for entry in history {
            let (oid, commit) = entry?;
            write!(self.writer(), "{}", LogEntry::new(&oid, &commit))?;
        }

        Ok(())
    }

    /// Print every commit ever made, in digest order
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for oid in self.database().list_commits()? {
            let commit = self.database().load_commit(&oid)?;
            write!(self.writer(), "{}", LogEntry::new(&oid, &commit))?;
        }

        Ok(())
    }

    /// Print the ID of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut found = false;
        for oid in self.database().list_commits()? {
            if self.database().load_commit(&oid)?.message() == message {
                writeln!(self.writer(), "{}", oid)?;
                found = true;
            }
        }

        if !found {
            anyhow::bail!(VcsError::NoCommitWithMessage);
        }

        Ok(())
    }
}
