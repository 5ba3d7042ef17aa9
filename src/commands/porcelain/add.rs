use crate::areas::index::StageOutcome;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::GitletError;
use std::path::Path;
use tracing::debug;

impl Repository {
    pub fn add(&mut self, file: &str) -> anyhow::Result<()> {
        let path = self
            .workspace()
            .normalize_path(file)
            .ok_or(GitletError::FileNotFound)?;
        self.stage_path(&path)
    }

    pub(crate) fn stage_path(&mut self, path: &Path) -> anyhow::Result<()> {
        let blob = self.workspace().parse_blob(path)?;
        let blob_id = blob.object_id()?;
        let head = self.head_commit()?;

        let outcome = self
            .index_mut()
            .stage(path, blob_id.clone(), head.blob(path));

        match &outcome {
            StageOutcome::Restored(removed_id) => self.removed().discard(removed_id)?,
            StageOutcome::Replaced(previous_id) => {
                self.staged().discard(previous_id)?;
                self.staged().store(&blob)?;
            }
            StageOutcome::Added => {
                self.staged().store(&blob)?;
            }
            StageOutcome::Unchanged => {}
        }

        debug!(path = %path.display(), oid = %blob_id, ?outcome, "staged");

        Ok(())
    }
}
