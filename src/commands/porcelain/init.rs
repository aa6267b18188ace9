use crate::areas::refs::BranchRegistry;
use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::VcsError;
use anyhow::Context;
use std::fs;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            anyhow::bail!(VcsError::AlreadyInitialized);
        }

        fs::create_dir_all(self.database().blobs_path())
            .context("Failed to create .gitlet/blobs directory")?;

        fs::create_dir_all(self.staging_path())
            .context("Failed to create .gitlet/staging directory")?;

        let root_oid = self
            .database()
            .store_commit(&Commit::root())
            .context("Failed to store the root commit")?;

        let branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs()
            .save(&BranchRegistry::new(branch, root_oid.clone()))
            .context("Failed to create the branch registry")?;

        tracing::info!(root = %root_oid, path = %self.path().display(), "initialized repository");

        Ok(())
    }
}
