use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::conflict::conflict_content;
use crate::artifacts::merge::resolution::{self, Resolution};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::collections::BTreeSet;
use tracing::{debug, info};

impl Repository {
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<MergeOutcome> {
        if !self.index().is_empty() {
            return Err(GitletError::UncommittedChanges.into());
        }

        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| GitletError::BranchNotFound)?;
        let other_oid = self
            .refs()
            .read_branch(&branch_name)
            .cloned()
            .ok_or(GitletError::BranchNotFound)?;
        if self.refs().is_current_branch(&branch_name) {
            return Err(GitletError::SelfMerge.into());
        }

        let current_branch = self.refs().current_branch().clone();
        let head_oid = self.refs().read_head()?.clone();
        let split_oid = self.split_point(&branch_name, &current_branch)?;

        let head = self.database().parse_object_as_commit(&head_oid)?;
        let other = self.database().parse_object_as_commit(&other_oid)?;
        let split = self.database().parse_object_as_commit(&split_oid)?;

        let touched = head
            .blobs()
            .keys()
            .chain(other.blobs().keys())
            .chain(split.blobs().keys())
            .collect::<BTreeSet<_>>();
        self.inspector().ensure_not_overwritten(touched)?;

        debug!(head = %head_oid, other = %other_oid, split = %split_oid, "merging");

        if split_oid == other_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(MergeOutcome::AlreadyAncestor);
        }

        if split_oid == head_oid {
            self.checkout_snapshot(&other)?;
            self.refs_mut().update_head(other_oid.clone());
            writeln!(self.writer(), "Current branch fast-forwarded.")?;

            info!(branch = %current_branch, head = %other_oid, "fast-forwarded");
            return Ok(MergeOutcome::FastForward);
        }

        let conflicted = self.apply_resolutions(&split, &head, &other)?;

        self.index_mut().set_merge_parent(other_oid);
        let merge_oid = self.commit(&format!(
            "Merged {} into {}.",
            branch_name, current_branch
        ))?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }
        info!(branch = %branch_name, commit = %merge_oid, conflicted, "merged");

        Ok(MergeOutcome::Merged { conflicted })
    }

    /// Merge base: the split point recorded for the merged branch, else the
    /// one recorded for the current branch, else the initial commit.
    fn split_point(
        &self,
        branch_name: &BranchName,
        current_branch: &BranchName,
    ) -> anyhow::Result<ObjectId> {
        match self
            .refs()
            .split_point(branch_name)
            .or_else(|| self.refs().split_point(current_branch))
        {
            Some(split_oid) => Ok(split_oid.clone()),
            None => Commit::root()?.object_id(),
        }
    }

    /// Stage the outcome of every path; true when any path conflicted.
    fn apply_resolutions(
        &mut self,
        split: &Commit,
        head: &Commit,
        other: &Commit,
    ) -> anyhow::Result<bool> {
        let mut conflicted = false;

        for (path, resolution) in resolution::plan(split.blobs(), head.blobs(), other.blobs()) {
            debug!(path = %path.display(), ?resolution, "resolved");

            match resolution {
                Resolution::Keep => {}
                Resolution::TakeOther(blob_oid) => {
                    self.checkout_blob(&path, &blob_oid)?;
                    self.stage_path(&path)?;
                }
                Resolution::RemoveOurs => self.remove_path(&path)?,
                Resolution::Conflict { ours, theirs } => {
                    let ours = self.blob_text(ours.as_ref())?;
                    let theirs = self.blob_text(theirs.as_ref())?;

                    self.workspace()
                        .write_file(&path, conflict_content(&ours, &theirs).as_bytes())?;
                    self.stage_path(&path)?;
                    conflicted = true;
                }
            }
        }

        Ok(conflicted)
    }

    fn blob_text(&self, blob_oid: Option<&ObjectId>) -> anyhow::Result<String> {
        match blob_oid {
            Some(blob_oid) => Ok(self
                .database()
                .parse_object_as_blob(blob_oid)?
                .content()
                .into_owned()),
            None => Ok(String::new()),
        }
    }
}
