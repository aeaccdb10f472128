//! Error kinds surfaced by the object store, codecs and index
//!
//! Every fallible operation in the library returns [`Result`], so callers can
//! match on the kind of failure instead of inspecting messages.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeEntry;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// Decoding stopped early; `recovered` holds the entries read before the fault.
    #[error("malformed tree object: {reason}")]
    MalformedTree {
        reason: String,
        recovered: Vec<TreeEntry>,
    },

    #[error("invalid index file: {0}")]
    InvalidIndex(String),

    #[error("invalid object: {0}")]
    InvalidObject(String),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("object storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid path {path}: {reason}")]
    Path { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attach path context to io errors
pub trait IoResultExt<T> {
    /// Working tree and index failures
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;

    /// Object store failures
    fn storage_at(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }

    fn storage_at(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Storage {
            path: path.into(),
            source,
        })
    }
}

impl Error {
    pub fn malformed_tree(reason: impl Into<String>, recovered: Vec<TreeEntry>) -> Self {
        Error::MalformedTree {
            reason: reason.into(),
            recovered,
        }
    }

    pub fn invalid_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Path {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
