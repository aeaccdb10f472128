//! Snapshots of working-tree files and directories
//!
//! `hash_file` turns one file into a blob, `hash_tree` walks a directory
//! bottom-up into nested trees. With `persist` set, every object is written
//! to the database and every file is upserted into the index; otherwise only
//! ids are computed.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::{EntryKind, Workspace};
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::errors::{Error, Result};
use derive_new::new;
use std::path::Path;

#[derive(Debug, new)]
pub struct TreeBuilder<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
    index: &'r Index,
}

impl TreeBuilder<'_> {
    pub fn hash_file(&self, file_path: &Path, persist: bool) -> Result<ObjectId> {
        if !file_path.is_file() {
            return Err(Error::invalid_path(file_path, "not a regular file"));
        }

        let blob = Blob::new(self.workspace.read_file(file_path)?);

        if !persist {
            return blob.object_id();
        }

        // stat before storing so a failing stat leaves nothing behind
        let name = self.workspace.relative_path(file_path)?;
        let metadata = self.workspace.stat_file(file_path)?;

        let object_id = self.database.store(&blob)?;
        self.index
            .upsert(IndexEntry::from_stat(name, object_id, &metadata))?;

        Ok(object_id)
    }

    /// `None` for a directory with nothing to snapshot
    pub fn hash_tree(&self, dir_path: &Path, persist: bool) -> Result<Option<ObjectId>> {
        if !dir_path.is_dir() {
            return Err(Error::invalid_path(dir_path, "not a directory"));
        }

        let mut entries = Vec::new();
        for entry in self.workspace.list_dir(dir_path)? {
            match entry.kind {
                EntryKind::File => {
                    let oid = self.hash_file(&entry.path, persist)?;
                    entries.push(TreeEntry::new(EntryMode::File, entry.name, oid));
                }
                EntryKind::Directory => {
                    if let Some(oid) = self.hash_tree(&entry.path, persist)? {
                        entries.push(TreeEntry::new(EntryMode::Directory, entry.name, oid));
                    }
                }
                EntryKind::Other => {
                    tracing::trace!(path = %entry.path.display(), "skipping special file");
                }
            }
        }

        if entries.is_empty() {
            return Ok(None);
        }

        let tree = Tree::new(entries);
        let object_id = if persist {
            self.database.store(&tree)?
        } else {
            tree.object_id()?
        };

        Ok(Some(object_id))
    }
}
