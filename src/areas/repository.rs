//! Repository handle
//!
//! Ties one working tree to its `.gitlet` directory. The handle itself holds
//! no mutable repository state: each command loads the branch registry and
//! the staging index on entry, threads them through its steps, and saves them
//! before returning.

use crate::areas::database::{Database, REGISTRY_FILE};
use crate::areas::index::Index;
use crate::areas::refs::{BranchRegistry, Refs};
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::status::status_info::Status;
use crate::config::Config;
use crate::errors::VcsError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the repository directory inside the working tree
pub const REPOSITORY_DIR: &str = ".gitlet";

const STAGING_DIR: &str = "staging";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    config: Config,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(
        path: impl AsRef<Path>,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let path = path
            .as_ref()
            .canonicalize()
            .with_context(|| format!("Unable to open working tree {:?}", path.as_ref()))?;
        let repository_path = path.join(REPOSITORY_DIR);

        let database = Database::new(repository_path.clone().into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(repository_path.join(REGISTRY_FILE).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            config,
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_path(&self) -> &Path {
        self.database.path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn status_inspector(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    pub fn is_initialized(&self) -> bool {
        self.repository_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            anyhow::bail!(VcsError::NotInitialized);
        }

        Ok(())
    }

    /// Load the branch registry, failing if there is no repository
    pub fn load_registry(&self) -> anyhow::Result<BranchRegistry> {
        self.ensure_initialized()?;
        self.refs.load()
    }

    /// Load the staging index from disk
    pub fn load_index(&self) -> anyhow::Result<Index> {
        let mut index = Index::new(self.staging_path().into_boxed_path());
        index.rehydrate()?;

        Ok(index)
    }

    pub fn staging_path(&self) -> PathBuf {
        self.repository_path().join(STAGING_DIR)
    }

    pub fn current_commit(&self, registry: &BranchRegistry) -> anyhow::Result<Commit> {
        self.database.load_commit(registry.current_commit_oid())
    }
}
