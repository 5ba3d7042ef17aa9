//! Staging area
//!
//! The index holds the pending change-set between two commits:
//!
//! - `entries`: staged blobs, at most one per path
//! - `removed`: paths pending removal, with the blob they were tracked as
//! - `merge_parent`: second parent of the next commit, set by merge
//!
//! A path is never both staged and pending removal. The index itself is
//! pure bookkeeping; the blob copies it refers to live in the `staged` and
//! `removed` object stores and are managed by the commands.

use crate::artifacts::objects::commit::BlobMap;
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Result of staging one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// A pending removal was cancelled; carries the blob that was pending removal
    Restored(ObjectId),
    /// A staged blob was replaced; carries the previous blob
    Replaced(ObjectId),
    /// The path was staged for the first time
    Added,
    /// Nothing to stage: the content is already staged or already committed
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    entries: BTreeMap<PathBuf, ObjectId>,
    removed: BTreeMap<PathBuf, ObjectId>,
    merge_parent: Option<ObjectId>,
}

impl Index {
    pub fn entries(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.entries
    }

    pub fn removed(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.removed
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn is_staged(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_removed(&self, path: &Path) -> bool {
        self.removed.contains_key(path)
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    pub fn set_merge_parent(&mut self, merge_parent: ObjectId) {
        self.merge_parent = Some(merge_parent);
    }

    /// No staged blobs and no pending removals
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.removed.is_empty()
    }

    /// Stage `blob_id` for `path`.
    ///
    /// `committed` is the blob HEAD tracks for the path, if any. A pending
    /// removal is cancelled without staging anything.
    pub fn stage(
        &mut self,
        path: &Path,
        blob_id: ObjectId,
        committed: Option<&ObjectId>,
    ) -> StageOutcome {
        if let Some(removed) = self.removed.remove(path) {
            return StageOutcome::Restored(removed);
        }

        match self.entries.get(path) {
            Some(staged) if *staged == blob_id => StageOutcome::Unchanged,
            Some(_) => self
                .entries
                .insert(path.to_path_buf(), blob_id)
                .map_or(StageOutcome::Added, StageOutcome::Replaced),
            None if committed == Some(&blob_id) => StageOutcome::Unchanged,
            None => {
                self.entries.insert(path.to_path_buf(), blob_id);
                StageOutcome::Added
            }
        }
    }

    /// Drop the staged blob for `path`, returning it.
    pub fn unstage(&mut self, path: &Path) -> Option<ObjectId> {
        self.entries.remove(path)
    }

    /// Record `path` as pending removal; it was tracked as `blob_id`.
    pub fn mark_removed(&mut self, path: &Path, blob_id: ObjectId) {
        self.entries.remove(path);
        self.removed.insert(path.to_path_buf(), blob_id);
    }

    /// Snapshot produced by applying the pending change-set to `base`.
    ///
    /// Removed paths are dropped first; staged entries win over `base`.
    pub fn apply_to(&self, base: &BlobMap) -> BlobMap {
        let mut blobs = base
            .iter()
            .filter(|(path, _)| !self.removed.contains_key(*path))
            .map(|(path, oid)| (path.clone(), oid.clone()))
            .collect::<BlobMap>();

        blobs.extend(
            self.entries
                .iter()
                .map(|(path, oid)| (path.clone(), oid.clone())),
        );

        blobs
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.removed.clear();
        self.merge_parent = None;
    }
}
