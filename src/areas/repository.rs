//! Repository context
//!
//! A `Repository` owns every area of one repository and is passed by
//! reference into each command. Mutable state (branch table and staging area)
//! is loaded with [`Repository::rehydrate`] and saved with
//! [`Repository::write_updates`]; both are called by the binary, once per
//! invocation, and nothing is saved when a command fails.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::inspector::Inspector;
use crate::artifacts::status::status_info::{Status, StatusInfo};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the repository metadata directory
pub const GITLET_DIR: &str = ".gitlet";

const OBJECTS_DIR: &str = "objects";
const STAGED_DIR: &str = "staged";
const REMOVED_DIR: &str = "removed";
const STATE_FILE: &str = "state";

/// Persisted form of the mutable areas
#[derive(Debug, Serialize, Deserialize)]
struct State {
    refs: Refs,
    index: Index,
}

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
    database: Database,
    staged: Database,
    removed: Database,
    workspace: Workspace,
    refs: Refs,
    index: Index,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to open repository at {}", path.display()))?;
        let gitlet_path = path.join(GITLET_DIR);

        let database = Database::new(gitlet_path.join(OBJECTS_DIR).into_boxed_path());
        let staged = Database::new(gitlet_path.join(STAGED_DIR).into_boxed_path());
        let removed = Database::new(gitlet_path.join(REMOVED_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(Commit::root()?.object_id()?);

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            staged,
            removed,
            workspace,
            refs,
            index: Index::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> PathBuf {
        self.path.join(GITLET_DIR)
    }

    fn state_path(&self) -> PathBuf {
        self.gitlet_path().join(STATE_FILE)
    }

    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    /// Committed objects
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Copies of staged blobs
    pub fn staged(&self) -> &Database {
        &self.staged
    }

    /// Copies of blobs pending removal
    pub fn removed(&self) -> &Database {
        &self.removed
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn refs_mut(&mut self) -> &mut Refs {
        &mut self.refs
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn inspector(&'_ self) -> Inspector<'_> {
        Inspector::new(self)
    }

    pub fn status_info(&self) -> anyhow::Result<StatusInfo> {
        Status::new(self).initialize()
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.database.parse_object_as_commit(self.refs.read_head()?)
    }

    /// Load the branch table and staging area from disk.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        let state_path = self.state_path();
        if !state_path.exists() {
            return Ok(());
        }

        let content = std::fs::read(&state_path)
            .with_context(|| format!("Unable to read {}", state_path.display()))?;
        let state: State = serde_json::from_slice(&content)
            .with_context(|| format!("Corrupt repository state {}", state_path.display()))?;

        self.refs = state.refs;
        self.index = state.index;

        Ok(())
    }

    /// Save the branch table and staging area through a temp file and rename.
    pub fn write_updates(&self) -> anyhow::Result<()> {
        let state = State {
            refs: self.refs.clone(),
            index: self.index.clone(),
        };
        let content = serde_json::to_vec_pretty(&state)?;

        let state_path = self.state_path();
        let temp_path = self
            .gitlet_path()
            .join(format!("{}.{}", STATE_FILE, Database::generate_temp_name()));

        std::fs::write(&temp_path, content)
            .with_context(|| format!("Unable to write {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &state_path)
            .with_context(|| format!("Unable to replace {}", state_path.display()))?;

        debug!(branch = %self.refs.current_branch(), "saved repository state");

        Ok(())
    }
}
