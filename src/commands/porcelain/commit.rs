use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use tracing::{info, warn};

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        if message.trim().is_empty() {
            return Err(GitletError::EmptyMessage.into());
        }
        // a pending merge may be committed without changes
        if self.index().is_empty() && self.index().merge_parent().is_none() {
            return Err(GitletError::NothingToCommit.into());
        }

        let parent_oid = self.refs().read_head()?.clone();
        let parent = self.database().parse_object_as_commit(&parent_oid)?;

        for blob_id in self.index().entries().values() {
            if !self.database().contains(blob_id) {
                self.staged().copy_to(blob_id, self.database())?;
            }
        }

        let commit = Commit::new(
            message.to_string(),
            Commit::timestamp_from_env()?,
            self.refs().current_branch().clone(),
            Some(parent_oid),
            self.index().merge_parent().cloned(),
            self.index().apply_to(parent.blobs()),
        );
        let commit_oid = commit.object_id()?;

        if self.database().contains(&commit_oid) {
            warn!(
                oid = %commit_oid,
                "a commit with the same message, branch and timestamp already exists"
            );
        }
        self.database().store(&commit)?;

        self.refs_mut().update_head(commit_oid.clone());
        self.index_mut().clear();
        self.staged().purge()?;
        self.removed().purge()?;

        info!(
            oid = %commit_oid,
            branch = %commit.branch(),
            files = commit.blobs().len(),
            merge = commit.is_merge(),
            "created commit"
        );

        Ok(commit_oid)
    }
}
