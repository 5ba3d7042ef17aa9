use crate::areas::repository::Repository;
use crate::errors::GitletError;
use std::path::Path;
use tracing::debug;

impl Repository {
    pub fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        let path = self
            .workspace()
            .normalize_path(file)
            .ok_or(GitletError::NothingToRemove)?;
        self.remove_path(&path)
    }

    pub(crate) fn remove_path(&mut self, path: &Path) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        let staged = self.index().entry_by_path(path).cloned();
        let tracked = head.blob(path).cloned();

        if staged.is_none() && tracked.is_none() {
            return Err(GitletError::NothingToRemove.into());
        }

        if let Some(staged_id) = staged {
            self.index_mut().unstage(path);
            self.staged().discard(&staged_id)?;
            debug!(path = %path.display(), "unstaged");
        }

        if let Some(tracked_id) = tracked {
            self.database().copy_to(&tracked_id, self.removed())?;
            self.index_mut().mark_removed(path, tracked_id);
            self.workspace().remove_file(path)?;
            debug!(path = %path.display(), "marked for removal");
        }

        Ok(())
    }
}
