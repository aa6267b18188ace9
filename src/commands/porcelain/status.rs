use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let registry = self.load_registry()?;
        let index = self.load_index()?;

        let status_info = self.status_inspector().initialize(&registry, &index)?;
        write!(self.writer(), "{}", status_info)?;

        Ok(())
    }
}
