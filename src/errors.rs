//! User-facing errors
//!
//! Every variant renders as the exact line printed to the user. Usage errors
//! (command line shape, repository presence) and domain errors (a specific
//! operation refusing to proceed) share one type so the binary can translate
//! them into output in a single place.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitletError {
    // usage errors
    #[error("Please enter a command.")]
    MissingCommand,
    #[error("No command with that name exists.")]
    UnknownCommand,
    #[error("Incorrect operands.")]
    IncorrectOperands,
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    // domain errors
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("File does not exist.")]
    FileNotFound,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("No reason to remove the file.")]
    NothingToRemove,
    #[error("Found no commit with that message.")]
    NoMatch,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("A branch with that name does not exist.")]
    BranchNotFound,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,
    #[error("No need to checkout the current branch.")]
    SameBranch,
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("There is an untracked file in the way; delete it or add it first.")]
    UntrackedConflict,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),
    #[error("No object with that id exists: {0}")]
    ObjectNotFound(ObjectId),
}

impl GitletError {
    /// Look through an error chain for a user-facing error.
    pub fn find(error: &anyhow::Error) -> Option<&GitletError> {
        error.chain().find_map(|cause| cause.downcast_ref::<GitletError>())
    }
}
