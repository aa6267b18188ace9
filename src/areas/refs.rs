//! Branch registry
//!
//! Branches are human-readable names pointing to commits. The registry records
//! every branch and which one is current; it is persisted as a single
//! reserved-name file at the repository root.
//!
//! ## File Format
//!
//! ```text
//! ref: <current-branch>
//! <branch> <commit-sha>
//! <branch> <commit-sha>
//! ```
//!
//! Branch lines are written in name order.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use anyhow::Context;
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

/// Regex pattern for parsing the current-branch line
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// In-memory branch registry
///
/// Invariant: the current branch is always a key of `branches`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRegistry {
    current: BranchName,
    branches: BTreeMap<BranchName, ObjectId>,
}

impl BranchRegistry {
    /// Registry with a single branch, pointing at the root commit, set as current
    pub fn new(branch: BranchName, root_oid: ObjectId) -> Self {
        BranchRegistry {
            branches: BTreeMap::from([(branch.clone(), root_oid)]),
            current: branch,
        }
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current
    }

    pub fn is_current_branch(&self, name: &BranchName) -> bool {
        &self.current == name
    }

    pub fn current_commit_oid(&self) -> &ObjectId {
        // the constructor and every mutation keep `current` in `branches`
        &self.branches[&self.current]
    }

    pub fn branch_oid(&self, name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    /// Create `name` pointing at the current commit
    pub fn add_branch(&mut self, name: BranchName) -> anyhow::Result<()> {
        if self.branches.contains_key(&name) {
            anyhow::bail!(VcsError::BranchExists);
        }

        let oid = self.current_commit_oid().clone();
        tracing::info!(branch = %name, commit = %oid, "created branch");
        self.branches.insert(name, oid);

        Ok(())
    }

    pub fn remove_branch(&mut self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if !self.branches.contains_key(name) {
            anyhow::bail!(VcsError::NoSuchBranch);
        }
        if self.is_current_branch(name) {
            anyhow::bail!(VcsError::CannotRemoveCurrent);
        }

        let oid = self
            .branches
            .remove(name)
            .ok_or(VcsError::NoSuchBranch)?;
        tracing::info!(branch = %name, commit = %oid, "removed branch");

        Ok(oid)
    }

    /// Switch branches without moving any of them
    pub fn set_current_branch(&mut self, name: BranchName) -> anyhow::Result<()> {
        if !self.branches.contains_key(&name) {
            anyhow::bail!(VcsError::NoSuchBranch);
        }

        self.current = name;
        Ok(())
    }

    /// Repoint the current branch without switching branches
    pub fn move_current_branch(&mut self, oid: ObjectId) {
        tracing::info!(branch = %self.current, commit = %oid, "moved branch");
        self.branches.insert(self.current.clone(), oid);
    }

    pub fn sorted_branch_names(&self) -> Vec<&BranchName> {
        self.branches.keys().collect()
    }

    fn serialize(&self) -> String {
        let mut lines = vec![format!("ref: {}", self.current)];
        lines.extend(
            self.branches
                .iter()
                .map(|(name, oid)| format!("{} {}", name, oid)),
        );
        lines.push(String::new());

        lines.join("\n")
    }

    fn parse(content: &str) -> anyhow::Result<Self> {
        let mut lines = content.lines();

        let head_line = lines.next().context("branch registry is empty")?;
        let current = regex::Regex::new(SYMREF_REGEX)?
            .captures(head_line)
            .with_context(|| format!("malformed current branch line {:?}", head_line))?[1]
            .to_string();
        let current = BranchName::try_parse(current)?;

        let branches = lines
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                let (name, oid) = line
                    .rsplit_once(' ')
                    .with_context(|| format!("malformed branch line {:?}", line))?;
                Ok((
                    BranchName::try_parse(name.to_string())?,
                    ObjectId::try_parse(oid.to_string())?,
                ))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

        if !branches.contains_key(&current) {
            anyhow::bail!("current branch {} has no entry in the registry", current);
        }

        Ok(BranchRegistry { current, branches })
    }
}

/// Persistence for the branch registry
///
/// Reads take a shared lock and writes an exclusive lock on the registry file.
#[derive(Debug)]
pub struct Refs {
    /// Path to the registry file (typically `.gitlet/branches`)
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<BranchRegistry> {
        let mut registry_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&self.path)
            .with_context(|| format!("failed to open branch registry at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut registry_file, Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut()
            .read_to_string(&mut content)
            .with_context(|| format!("failed to read branch registry at {:?}", self.path))?;

        BranchRegistry::parse(&content)
            .with_context(|| format!("corrupt branch registry at {:?}", self.path))
    }

    pub fn save(&self, registry: &BranchRegistry) -> anyhow::Result<()> {
        // open the registry file as WRONLY and CREAT to overwrite it
        let mut registry_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_context(|| format!("failed to open branch registry at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut registry_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut()
            .write_all(registry.serialize().as_bytes())
            .with_context(|| format!("failed to write branch registry at {:?}", self.path))?;

        Ok(())
    }
}
