//! Repository configuration
//!
//! Every area is built from one explicit [`RepositoryConfig`]; nothing reads
//! the process working directory behind the caller's back.

use std::path::{Path, PathBuf};

/// Directory holding objects, the index and HEAD
pub const DEFAULT_STORE_DIR: &str = ".groot";

/// Metadata directories of compatible tools, never snapshotted
pub const LEGACY_STORE_DIRS: [&str; 1] = [".git"];

/// Order in which directory entries are encoded into trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryOrder {
    /// Whatever the directory enumeration yields
    #[default]
    Listing,
    /// Sorted by name bytes, so identical contents hash identically everywhere
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub root: PathBuf,
    pub store_dir: String,
    pub legacy_dirs: Vec<String>,
    pub entry_order: EntryOrder,
}

impl RepositoryConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        RepositoryConfig {
            root: root.into(),
            store_dir: DEFAULT_STORE_DIR.to_string(),
            legacy_dirs: LEGACY_STORE_DIRS.iter().map(|dir| dir.to_string()).collect(),
            entry_order: EntryOrder::default(),
        }
    }

    pub fn with_store_dir(mut self, store_dir: impl Into<String>) -> Self {
        self.store_dir = store_dir.into();
        self
    }

    pub fn with_entry_order(mut self, entry_order: EntryOrder) -> Self {
        self.entry_order = entry_order;
        self
    }

    pub fn store_path(&self) -> PathBuf {
        self.root.join(&self.store_dir)
    }

    pub fn objects_path(&self) -> PathBuf {
        self.store_path().join("objects")
    }

    pub fn index_path(&self) -> PathBuf {
        self.store_path().join("index")
    }

    /// Directory names excluded from every snapshot
    pub fn ignored_names(&self) -> Vec<String> {
        let mut ignored = vec![self.store_dir.clone()];
        ignored.extend(
            self.legacy_dirs
                .iter()
                .filter(|dir| **dir != self.store_dir)
                .cloned(),
        );
        ignored
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
