//! User-facing commands
//!
//! Each command is an `impl Repository` block operating on the in-memory
//! areas. None of them saves the branch table or staging area; the caller
//! does that once the command has succeeded.
//!
//! ## Commands
//!
//! - `init`: create the repository and its initial commit
//! - `add`, `rm`: stage additions and removals
//! - `commit`: snapshot the staged changes
//! - `log`, `global-log`, `find`: inspect history
//! - `branch`, `rm-branch`: manage branch refs
//! - `checkout`: switch branches or restore a single file
//! - `reset`: move the current branch to a commit
//! - `merge`: three-way merge of another branch into the current one
//! - `status`: branches, staging area and untracked files

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
