use crate::areas::repository::Repository;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print a blob's bytes, or a commit's fields and message
    ///
    /// Only a full ID can name a blob; commits also resolve from a prefix.
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if object_id.len() == OBJECT_ID_LENGTH
            && let Ok(oid) = ObjectId::try_parse(object_id.to_string())
            && self.database().has_blob(&oid)
        {
            let blob = self.database().load_blob(&oid)?;
            self.writer().write_all(blob.content())?;
            return Ok(());
        }

        let commit_oid = self.database().resolve_prefix(object_id)?;
        let commit = self.database().load_commit(&commit_oid)?;
        writeln!(self.writer(), "{}", commit.display())?;

        Ok(())
    }
}
