use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

const CONFLICT_HEAD_MARKER: &str = "<<<<<<< HEAD\n";
const CONFLICT_SEPARATOR: &str = "=======\n";
const CONFLICT_END_MARKER: &str = ">>>>>>>\n";

/// What a merge does to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Only the other side changed the file: take its content
    TakeOther(ObjectId),
    /// Only the other side changed the file, by deleting it
    Remove,
    /// Both sides changed the file, differently
    Conflict {
        head: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

/// Decide the fate of one file from its blob in the split point, the
/// current tip and the other tip (`None` where the file is absent)
///
/// Returns `None` when the current version stands: both tips agree, or
/// only the current side changed.
pub fn resolve(
    split: Option<&ObjectId>,
    head: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> Option<Resolution> {
    if head == other || split == other {
        return None;
    }

    if split == head {
        return Some(match other {
            Some(oid) => Resolution::TakeOther(oid.clone()),
            None => Resolution::Remove,
        });
    }

    Some(Resolution::Conflict {
        head: head.cloned(),
        other: other.cloned(),
    })
}

/// Resolve every path present in any of the three snapshots
///
/// Paths whose current version stands are left out.
pub fn resolve_snapshots(
    split: &Snapshot,
    head: &Snapshot,
    other: &Snapshot,
) -> BTreeMap<PathBuf, Resolution> {
    let paths = split
        .keys()
        .chain(head.keys())
        .chain(other.keys())
        .collect::<BTreeSet<_>>();

    paths
        .into_iter()
        .filter_map(|path| {
            resolve(split.get(path), head.get(path), other.get(path))
                .map(|resolution| (path.clone(), resolution))
        })
        .collect()
}

/// Content written over a conflicted file
///
/// An absent side contributes nothing between its markers.
pub fn conflict_content(head: Option<&[u8]>, other: Option<&[u8]>) -> Vec<u8> {
    let mut content = Vec::new();

    content.extend_from_slice(CONFLICT_HEAD_MARKER.as_bytes());
    content.extend_from_slice(head.unwrap_or_default());
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(other.unwrap_or_default());
    content.extend_from_slice(CONFLICT_END_MARKER.as_bytes());

    content
}

/// Whether `content` still carries an unresolved conflict
pub fn has_conflict_markers(content: &[u8]) -> bool {
    content
        .windows(CONFLICT_HEAD_MARKER.len())
        .any(|window| window == CONFLICT_HEAD_MARKER.as_bytes())
}
