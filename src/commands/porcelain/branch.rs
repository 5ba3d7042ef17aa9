use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::GitletError;
use tracing::info;

impl Repository {
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.refs().read_head()?.clone();

        self.refs_mut()
            .create_branch(branch_name.clone(), head_oid.clone())?;
        info!(branch = %branch_name, split_point = %head_oid, "created branch");

        Ok(())
    }

    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        // an invalid name cannot name an existing branch
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| GitletError::BranchNotFound)?;

        let head_oid = self.refs_mut().delete_branch(&branch_name)?;
        info!(branch = %branch_name, head = %head_oid, "deleted branch");

        Ok(())
    }
}
