use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object::Object;
use crate::errors::VcsError;
use std::io::Write;

impl Repository {
    pub fn hash_object(&mut self, file: &str, write: bool) -> anyhow::Result<()> {
        let path = Workspace::relative_path(file)?;
        if !self.workspace().file_exists(&path) {
            anyhow::bail!(VcsError::FileNotFound);
        }

        let blob = self.workspace().parse_blob(&path)?;
        let blob_oid = blob.object_id()?;

        // storing needs a repository, hashing does not
        if write {
            self.ensure_initialized()?;
            self.database().store_blob(&blob)?;
        }

        writeln!(self.writer(), "{}", blob_oid)?;

        Ok(())
    }
}
