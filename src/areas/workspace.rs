use crate::config::EntryOrder;
use crate::errors::{Error, IoResultExt, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a directory entry is, as seen without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks, devices, sockets and fifos
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    ignored: Vec<String>,
    entry_order: EntryOrder,
}

impl Workspace {
    pub fn new(path: Box<Path>, ignored: Vec<String>, entry_order: EntryOrder) -> Self {
        Workspace {
            path,
            ignored,
            entry_order,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a user-supplied path against the workspace root
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        };

        joined
            .canonicalize()
            .map_err(|_| Error::invalid_path(path, "no such file or directory"))
    }

    /// Immediate children of `dir_path`, minus the store directories
    pub fn list_dir(&self, dir_path: &Path) -> Result<Vec<DirEntry>> {
        if !dir_path.is_dir() {
            return Err(Error::invalid_path(dir_path, "not a directory"));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(dir_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir_path).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                Error::Io { path, source }
            })?;

            let name = entry.file_name().to_string_lossy().into_owned();
            if self.is_ignored(&name) {
                continue;
            }

            let file_type = entry.file_type();
            let kind = if file_type.is_file() {
                EntryKind::File
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::Other
            };

            entries.push(DirEntry {
                name,
                path: entry.into_path(),
                kind,
            });
        }

        if self.entry_order == EntryOrder::Name {
            entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        }

        tracing::debug!(dir = %dir_path.display(), entries = entries.len(), "listed directory");

        Ok(entries)
    }

    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        let content = std::fs::read(file_path).with_path(file_path)?;

        Ok(content.into())
    }

    pub fn stat_file(&self, file_path: &Path) -> Result<std::fs::Metadata> {
        std::fs::metadata(file_path).with_path(file_path)
    }

    /// Path of `file_path` relative to the root, with `/` separators
    pub fn relative_path(&self, file_path: &Path) -> Result<String> {
        let relative = file_path
            .strip_prefix(&self.path)
            .map_err(|_| Error::invalid_path(file_path, "outside the repository root"))?;

        let components = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>();

        Ok(components.join("/"))
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignored.iter().any(|ignored| ignored == name)
    }
}
