use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use derive_new::new;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub type FileSet = BTreeSet<PathBuf>;

/// Everything `status` prints, each section sorted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) current_branch: BranchName,
    pub(crate) branches: Vec<BranchName>,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let refs = self.repository.refs();
        let index = self.repository.index();

        Ok(StatusInfo {
            current_branch: refs.current_branch().clone(),
            branches: refs.list_branches().cloned().collect(),
            staged_files: index.entries().keys().cloned().collect(),
            removed_files: index.removed().keys().cloned().collect(),
            untracked_files: self.repository.inspector().untracked_files()?,
        })
    }
}
