use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::VcsError;

impl Repository {
    /// Create a branch at the current commit without switching to it
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let mut registry = self.load_registry()?;

        registry.add_branch(BranchName::try_parse(name.to_string())?)?;

        self.refs().save(&registry)
    }

    /// Delete a branch pointer; its commits stay in the store
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let mut registry = self.load_registry()?;

        // a name that could never have been created cannot exist
        let name = BranchName::try_parse(name.to_string()).map_err(|_| VcsError::NoSuchBranch)?;
        registry.remove_branch(&name)?;

        self.refs().save(&registry)
    }
}
