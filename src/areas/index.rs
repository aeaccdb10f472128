//! Index file on disk
//!
//! Wraps the pure codec in `artifacts::index::index_file` with file access.
//! Reads hold a shared lock and the upsert read-modify-write holds an
//! exclusive lock for its whole duration, so concurrent `add`s cannot lose
//! each other's entries.
//!
//! A missing or zero-length index file means "no index yet".

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_file;
use crate::errors::{IoResultExt, Result};
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    path: Box<Path>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write a header-only index unless one already exists
    pub fn initialize(&self) -> Result<()> {
        if self.exists() {
            return Ok(());
        }

        std::fs::write(self.path(), index_file::serialize(&[])).with_path(self.path())
    }

    /// All entries in file order
    pub fn load(&self) -> Result<Vec<IndexEntry>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut index_file = std::fs::File::open(self.path()).with_path(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)
            .with_path(self.path())?;

        let mut bytes = Vec::new();
        lock.deref_mut()
            .read_to_end(&mut bytes)
            .with_path(self.path())?;

        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        index_file::parse(&bytes)
    }

    /// Insert or replace the entry for `entry.name` and rewrite the file
    pub fn upsert(&self, entry: IndexEntry) -> Result<()> {
        let name = entry.name.clone();

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_path(parent)?;
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.path())
            .with_path(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)
            .with_path(self.path())?;

        let mut existing = Vec::new();
        lock.deref_mut()
            .read_to_end(&mut existing)
            .with_path(self.path())?;

        let existing = (!existing.is_empty()).then_some(existing.as_slice());
        let updated = index_file::upsert(existing, entry)?;

        lock.set_len(0).with_path(self.path())?;
        lock.deref_mut()
            .seek(SeekFrom::Start(0))
            .with_path(self.path())?;
        lock.deref_mut()
            .write_all(&updated)
            .with_path(self.path())?;

        tracing::debug!(path = %name, size = updated.len(), "updated index");

        Ok(())
    }
}
