use crate::areas::repository::Repository;
use crate::artifacts::log::graph::CommitGraph;

impl Repository {
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let matches = CommitGraph::new(self.database()).find_by_message(message)?;

        for commit_oid in matches {
            writeln!(self.writer(), "{}", commit_oid)?;
        }

        Ok(())
    }
}
