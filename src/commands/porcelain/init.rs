use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;
use anyhow::Context;
use std::fs;
use tracing::info;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(GitletError::AlreadyInitialized.into());
        }

        for store in [self.database(), self.staged(), self.removed()] {
            fs::create_dir_all(store.objects_path()).with_context(|| {
                format!("Failed to create {}", store.objects_path().display())
            })?;
        }

        let root_oid = self
            .database()
            .store(&Commit::root()?)
            .context("Failed to store the initial commit")?;

        *self.refs_mut() = Refs::new(root_oid.clone());
        *self.index_mut() = Index::default();

        info!(path = %self.path().display(), root = %root_oid, "initialized repository");

        Ok(())
    }
}
