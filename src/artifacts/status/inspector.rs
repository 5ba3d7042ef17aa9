use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;
use derive_new::new;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// A file on disk is untracked when it is not staged and HEAD does not
    /// track it, or it is pending removal.
    pub fn is_untracked(path: &Path, index: &Index, head: &Commit) -> bool {
        !index.is_staged(path) && (!head.tracks(path) || index.is_removed(path))
    }

    pub fn untracked_files(&self) -> anyhow::Result<BTreeSet<PathBuf>> {
        let head = self.repository.head_commit()?;
        let index = self.repository.index();

        Ok(self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|path| Self::is_untracked(path, index, &head))
            .collect())
    }

    /// Fail when any untracked file sits at one of `paths`.
    pub fn ensure_not_overwritten<'p>(
        &self,
        paths: impl IntoIterator<Item = &'p PathBuf>,
    ) -> anyhow::Result<()> {
        let untracked = self.untracked_files()?;

        if let Some(path) = paths.into_iter().find(|path| untracked.contains(*path)) {
            debug!(path = %path.display(), "untracked file would be overwritten");
            return Err(GitletError::UntrackedConflict.into());
        }

        Ok(())
    }
}
