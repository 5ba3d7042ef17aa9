use crate::areas::repository::Repository;
use tracing::info;

impl Repository {
    /// Move the current branch to a commit, restoring the files it tracks
    /// that are currently tracked or staged.
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let target_oid = self.database().resolve_prefix(commit_id)?;
        let target = self.database().parse_object_as_commit(&target_oid)?;
        let head = self.head_commit()?;

        for (path, blob_oid) in target.blobs() {
            if head.tracks(path) || self.index().is_staged(path) {
                self.checkout_blob(path, blob_oid)?;
            }
        }

        self.clear_staging_area()?;
        self.refs_mut().update_head(target_oid.clone());

        info!(branch = %self.refs().current_branch(), head = %target_oid, "reset");

        Ok(())
    }
}
