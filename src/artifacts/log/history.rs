use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Commits from `start` back to the root, following first parents only
#[derive(Clone, new)]
pub struct FirstParentHistory<'d> {
    database: &'d Database,
    start: ObjectId,
}

impl<'d> IntoIterator for FirstParentHistory<'d> {
    type Item = anyhow::Result<(ObjectId, Commit)>;
    type IntoIter = FirstParentHistoryIter<'d>;

    fn into_iter(self) -> Self::IntoIter {
        FirstParentHistoryIter {
            database: self.database,
            next_oid: Some(self.start),
        }
    }
}

pub struct FirstParentHistoryIter<'d> {
    database: &'d Database,
    next_oid: Option<ObjectId>,
}

impl Iterator for FirstParentHistoryIter<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next_oid.take()?;

        match self.database.load_commit(&oid) {
            Ok(commit) => {
                self.next_oid = commit.parent().cloned();
                Some(Ok((oid, commit)))
            }
            // a broken link ends the walk after reporting it
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::Snapshot;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    #[test]
    fn walk_skips_merge_parents_and_ends_at_the_root() {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().to_path_buf().into_boxed_path());
        let root = database.store_commit(&Commit::root()).unwrap();
        let timestamp = Commit::root().timestamp();

        let side = database
            .store_commit(&Commit::new("side".into(), timestamp, root.clone(), None, Snapshot::new()))
            .unwrap();
        let main = database
            .store_commit(&Commit::new("main".into(), timestamp, root.clone(), None, Snapshot::new()))
            .unwrap();
        let merge = database
            .store_commit(&Commit::new(
                "merge".into(),
                timestamp,
                main.clone(),
                Some(side),
                Snapshot::new(),
            ))
            .unwrap();

        let visited = FirstParentHistory::new(&database, merge.clone())
            .into_iter()
            .map(|entry| entry.unwrap().0)
            .collect::<Vec<_>>();

        assert_eq!(visited, vec![merge, main, root]);
    }

    #[test]
    fn missing_commit_is_reported_once() {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().to_path_buf().into_boxed_path());

        let mut history = FirstParentHistory::new(&database, ObjectId::hash(b"gone")).into_iter();

        assert!(history.next().unwrap().is_err());
        assert!(history.next().is_none());
    }
}
