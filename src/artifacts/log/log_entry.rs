use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::fmt;

/// One commit as printed by `log`
///
/// ```text
/// ===
/// commit <sha>
/// Merge: <parent-prefix> <merge-parent-prefix>
/// Date: <timestamp>
/// <message>
///
/// ```
///
/// The `Merge:` line appears only on merge commits.
#[derive(new)]
pub struct LogEntry<'c> {
    oid: &'c ObjectId,
    commit: &'c Commit,
}

impl fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===")?;
        writeln!(f, "commit {}", self.oid)?;
        if let (Some(parent), Some(merge_parent)) =
            (self.commit.parent(), self.commit.merge_parent())
        {
            writeln!(
                f,
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            )?;
        }
        writeln!(f, "Date: {}", self.commit.readable_timestamp())?;
        writeln!(f, "{}", self.commit.message())?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::Snapshot;
    use crate::artifacts::objects::object::Object;
    use pretty_assertions::assert_eq;

    #[test]
    fn root_entry() {
        let root = Commit::root();
        let oid = root.object_id().unwrap();

        assert_eq!(
            LogEntry::new(&oid, &root).to_string(),
            format!("===\ncommit {}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n", oid)
        );
    }

    #[test]
    fn merge_entry_shows_both_parent_prefixes() {
        let parent = ObjectId::hash(b"parent");
        let other = ObjectId::hash(b"other");
        let merge = Commit::new(
            "Merged feat into master.".to_string(),
            Commit::root().timestamp(),
            parent.clone(),
            Some(other.clone()),
            Snapshot::new(),
        );
        let oid = merge.object_id().unwrap();

        let entry = LogEntry::new(&oid, &merge).to_string();

        assert!(entry.contains(&format!(
            "\nMerge: {} {}\nDate: ",
            &parent.as_ref()[..7],
            &other.as_ref()[..7]
        )));
        assert!(entry.ends_with("Merged feat into master.\n\n"));
    }
}
