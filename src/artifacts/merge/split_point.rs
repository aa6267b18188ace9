use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// Split point search over the commit graph
///
/// The search runs in two phases:
///
/// 1. Collect every ancestor of the current tip (the tip included) with a
///    breadth-first walk over both parents.
/// 2. Walk breadth-first from the other tip, first parent before merge
///    parent, and stop at the first commit that phase 1 collected.
///
/// Phase 2 does not remember visited commits, so a commit reachable along
/// several paths may be examined more than once. The first hit is therefore
/// the ancestor of the other tip closest in breadth-first order, which is
/// not necessarily a best common ancestor in criss-cross histories.
pub struct SplitPointFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> SplitPointFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    /// # Arguments
    ///
    /// * `parents_loader` - Returns the parent IDs of a commit, first parent
    ///   first; an empty vector for the root commit
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    /// Every commit reachable from `tip`, `tip` included
    pub fn ancestors(&self, tip: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::from([tip.clone()]);
        let mut queue = VecDeque::from([tip.clone()]);

        while let Some(oid) = queue.pop_front() {
            for parent in (self.parents_loader)(&oid)? {
                if visited.insert(parent.clone()) {
                    queue.push_back(parent);
                }
            }
        }

        Ok(visited)
    }

    /// The split point of `head` and `other`
    ///
    /// Returns `None` only when the two commits share no history, which
    /// cannot happen inside a single repository.
    pub fn find_split_point(
        &self,
        head: &ObjectId,
        other: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let head_ancestors = self.ancestors(head)?;
        let mut queue = VecDeque::from([other.clone()]);

        while let Some(oid) = queue.pop_front() {
            if head_ancestors.contains(&oid) {
                tracing::debug!(split_point = %oid, "found split point");
                return Ok(Some(oid));
            }

            queue.extend((self.parents_loader)(&oid)?);
        }

        Ok(None)
    }
}
