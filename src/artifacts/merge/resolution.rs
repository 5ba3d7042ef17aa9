use crate::artifacts::objects::commit::BlobMap;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Decision for one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Current side already has the wanted content
    Keep,
    /// Only the other side changed: take its blob
    TakeOther(ObjectId),
    /// Only the other side changed, by deleting the path
    RemoveOurs,
    /// Both sides changed differently; absent sides are `None`
    Conflict {
        ours: Option<ObjectId>,
        theirs: Option<ObjectId>,
    },
}

impl Resolution {
    /// Compare one path across the split point, current and other snapshots.
    /// Absence is a state of its own.
    pub fn resolve(
        split: Option<&ObjectId>,
        ours: Option<&ObjectId>,
        theirs: Option<&ObjectId>,
    ) -> Self {
        let ours_changed = ours != split;
        let theirs_changed = theirs != split;

        match (ours_changed, theirs_changed) {
            (_, false) => Resolution::Keep,
            (false, true) => match theirs {
                Some(theirs) => Resolution::TakeOther(theirs.clone()),
                None => Resolution::RemoveOurs,
            },
            (true, true) if ours == theirs => Resolution::Keep,
            (true, true) => Resolution::Conflict {
                ours: ours.cloned(),
                theirs: theirs.cloned(),
            },
        }
    }
}

/// Resolution of every path in any of the three snapshots, skipping paths
/// that need no action.
pub fn plan(split: &BlobMap, ours: &BlobMap, theirs: &BlobMap) -> BTreeMap<PathBuf, Resolution> {
    let paths = split
        .keys()
        .chain(ours.keys())
        .chain(theirs.keys())
        .collect::<BTreeSet<_>>();

    paths
        .into_iter()
        .map(|path| {
            let resolution =
                Resolution::resolve(split.get(path), ours.get(path), theirs.get(path));
            (path.clone(), resolution)
        })
        .filter(|(_, resolution)| *resolution != Resolution::Keep)
        .collect()
}
