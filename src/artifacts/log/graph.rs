use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use derive_new::new;

/// Unordered view over every commit in the object store
///
/// Commits are visited in identity order, which is stable but carries no
/// meaning.
#[derive(new)]
pub struct CommitGraph<'d> {
    database: &'d Database,
}

impl<'d> CommitGraph<'d> {
    pub fn all_commits(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        self.database
            .commit_ids()?
            .into_iter()
            .map(|oid| {
                let commit = self.database.parse_object_as_commit(&oid)?;
                Ok((oid, commit))
            })
            .collect()
    }

    /// Identities of the commits whose message is exactly `message`.
    pub fn find_by_message(&self, message: &str) -> anyhow::Result<Vec<ObjectId>> {
        let matches = self
            .all_commits()?
            .into_iter()
            .filter(|(_, commit)| commit.message() == message)
            .map(|(oid, _)| oid)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(GitletError::NoMatch.into());
        }

        Ok(matches)
    }
}
