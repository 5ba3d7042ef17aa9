use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// Revision naming the current HEAD commit in `checkout <commit> -- <file>`
pub const HEAD_REF_NAME: &str = "HEAD";

impl Repository {
    /// Switch to another branch, replacing the working files with its snapshot.
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| GitletError::NoSuchBranch)?;

        if self.refs().is_current_branch(&branch_name) {
            return Err(GitletError::SameBranch.into());
        }

        let target_oid = self
            .refs()
            .read_branch(&branch_name)
            .cloned()
            .ok_or(GitletError::NoSuchBranch)?;
        let target = self.database().parse_object_as_commit(&target_oid)?;

        self.inspector()
            .ensure_not_overwritten(target.blobs().keys())?;
        self.checkout_snapshot(&target)?;
        self.refs_mut().switch_to(&branch_name)?;

        info!(branch = %branch_name, head = %target_oid, "switched branch");

        Ok(())
    }

    /// Restore one file from a commit (`HEAD`, a full id or an abbreviation).
    pub fn checkout_file(&mut self, revision: &str, file: &str) -> anyhow::Result<()> {
        let commit_oid = if revision == HEAD_REF_NAME {
            self.refs().read_head()?.clone()
        } else {
            self.database().resolve_prefix(revision)?
        };
        let commit = self.database().parse_object_as_commit(&commit_oid)?;

        let path = self
            .workspace()
            .normalize_path(file)
            .ok_or(GitletError::FileNotInCommit)?;
        let blob_oid = commit.blob(&path).ok_or(GitletError::FileNotInCommit)?;

        self.checkout_blob(&path, blob_oid)
    }

    /// Make the working files match `target` and empty the staging area.
    ///
    /// Paths tracked by HEAD or staged but absent from `target` are deleted;
    /// untracked files are never touched.
    pub(crate) fn checkout_snapshot(&mut self, target: &Commit) -> anyhow::Result<()> {
        let head = self.head_commit()?;

        for (path, blob_oid) in target.blobs() {
            self.checkout_blob(path, blob_oid)?;
        }

        // only files the repository knows about; untracked files stay on disk
        let stale = head
            .blobs()
            .keys()
            .chain(self.index().entries().keys())
            .filter(|path| !target.tracks(path))
            .cloned()
            .collect::<BTreeSet<PathBuf>>();
        for path in stale {
            self.workspace().remove_file(&path)?;
        }

        self.clear_staging_area()
    }

    pub(crate) fn checkout_blob(&self, path: &Path, blob_oid: &ObjectId) -> anyhow::Result<()> {
        let blob = self.database().parse_object_as_blob(blob_oid)?;
        self.workspace().write_file(path, blob.data())
    }

    pub(crate) fn clear_staging_area(&mut self) -> anyhow::Result<()> {
        self.index_mut().clear();
        self.staged().purge()?;
        self.removed().purge()
    }
}
