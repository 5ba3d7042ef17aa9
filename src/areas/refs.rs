//! Branch table
//!
//! Maps branch names to their head commit. Exactly one branch is current and
//! HEAD is always the head of the current branch.
//!
//! Each branch created after `init` also records a split point: the HEAD
//! commit at the moment the branch was created. Merge uses it as the merge
//! base instead of computing a common ancestor.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refs {
    current: BranchName,
    branches: BTreeMap<BranchName, ObjectId>,
    split_points: BTreeMap<BranchName, ObjectId>,
}

impl Refs {
    /// Table with only the default branch, pointing at `root`
    pub fn new(root: ObjectId) -> Self {
        Refs {
            current: BranchName::default_branch(),
            branches: BTreeMap::from([(BranchName::default_branch(), root)]),
            split_points: BTreeMap::new(),
        }
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> bool {
        &self.current == branch_name
    }

    pub fn read_head(&self) -> anyhow::Result<&ObjectId> {
        self.branches
            .get(&self.current)
            .with_context(|| format!("current branch {} has no head", self.current))
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(branch_name)
    }

    /// Branch names in sorted order
    pub fn list_branches(&self) -> impl Iterator<Item = &BranchName> {
        self.branches.keys()
    }

    pub fn split_point(&self, branch_name: &BranchName) -> Option<&ObjectId> {
        self.split_points.get(branch_name)
    }

    /// Create a branch at `head`, recording `head` as its split point.
    pub fn create_branch(&mut self, branch_name: BranchName, head: ObjectId) -> anyhow::Result<()> {
        if self.branches.contains_key(&branch_name) {
            return Err(GitletError::BranchExists.into());
        }

        self.split_points.insert(branch_name.clone(), head.clone());
        self.branches.insert(branch_name, head);

        Ok(())
    }

    /// Delete a branch ref; the commits it pointed at are untouched.
    pub fn delete_branch(&mut self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        if !self.branches.contains_key(branch_name) {
            return Err(GitletError::BranchNotFound.into());
        }
        if self.is_current_branch(branch_name) {
            return Err(GitletError::CannotRemoveCurrent.into());
        }

        self.split_points.remove(branch_name);
        self.branches
            .remove(branch_name)
            .ok_or_else(|| GitletError::BranchNotFound.into())
    }

    /// Make an existing branch current.
    pub fn switch_to(&mut self, branch_name: &BranchName) -> anyhow::Result<()> {
        if !self.branches.contains_key(branch_name) {
            return Err(GitletError::NoSuchBranch.into());
        }

        self.current = branch_name.clone();
        Ok(())
    }

    /// Move the current branch (and therefore HEAD) to `head`.
    pub fn update_head(&mut self, head: ObjectId) {
        self.branches.insert(self.current.clone(), head);
    }
}
