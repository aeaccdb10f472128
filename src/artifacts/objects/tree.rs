//! Tree object
//!
//! Trees represent directory snapshots. They list files (blobs), subdirectories
//! (other trees) and embedded repositories (commits) by mode, name and id.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are encoded in the order they are given. The decoder accepts
//! payloads with or without the frame header and never reads past the end
//! of its input.

use crate::artifacts::objects::OBJECT_ID_SIZE;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;

const TREE_HEADER_PREFIX: &[u8] = b"tree ";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn object_type(&self) -> ObjectType {
        self.mode.object_type()
    }
}

impl std::fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}\t{}",
            self.mode.canonical(),
            self.object_type(),
            self.oid,
            self.name
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode entries into a tree payload, in the given order
    ///
    /// No sorting or deduplication happens here; names must already be unique
    /// and free of NUL bytes.
    pub fn encode(entries: &[TreeEntry]) -> Bytes {
        let mut payload = BytesMut::new();

        for entry in entries {
            payload.put_slice(entry.mode.as_str().as_bytes());
            payload.put_u8(b' ');
            payload.put_slice(entry.name.as_bytes());
            payload.put_u8(0);
            payload.put_slice(entry.oid.as_bytes());
        }

        payload.freeze()
    }

    /// Decode a tree payload back into entries
    ///
    /// A leading `tree <size>\0` header is skipped when present. On truncated
    /// or corrupt input the error carries the entries decoded so far.
    pub fn decode(data: &[u8]) -> Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        let mut rest = &data[Self::header_len(data)..];

        while !rest.is_empty() {
            let Some(space) = rest.iter().position(|&b| b == b' ') else {
                return Err(Self::malformed("missing mode terminator", entries));
            };
            let Ok(mode) = std::str::from_utf8(&rest[..space]) else {
                return Err(Self::malformed("mode is not valid UTF-8", entries));
            };
            let mode = EntryMode::from(mode);
            rest = &rest[space + 1..];

            let Some(nul) = rest.iter().position(|&b| b == 0) else {
                return Err(Self::malformed("missing name terminator", entries));
            };
            let Ok(name) = std::str::from_utf8(&rest[..nul]) else {
                return Err(Self::malformed("entry name is not valid UTF-8", entries));
            };
            let name = name.to_string();
            rest = &rest[nul + 1..];

            let Some(oid) = ObjectId::from_slice(rest) else {
                return Err(Self::malformed(
                    format!("truncated object id for entry {name:?}"),
                    entries,
                ));
            };
            rest = &rest[OBJECT_ID_SIZE..];

            entries.push(TreeEntry::new(mode, name, oid));
        }

        Ok(entries)
    }

    fn header_len(data: &[u8]) -> usize {
        if !data.starts_with(TREE_HEADER_PREFIX) {
            return 0;
        }

        data.iter()
            .position(|&b| b == 0)
            .map_or(0, |nul| nul + 1)
    }

    fn malformed(reason: impl Into<String>, recovered: Vec<TreeEntry>) -> Error {
        let reason = reason.into();
        tracing::warn!(recovered = recovered.len(), %reason, "tree decoding stopped early");
        Error::malformed_tree(reason, recovered)
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        Ok(frame(self.object_type(), &Self::encode(&self.entries)))
    }
}

impl Unpackable for Tree {
    fn deserialize(payload: Bytes) -> Result<Self> {
        Ok(Self::new(Self::decode(&payload)?))
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.to_string())
            .collect::<Vec<String>>()
            .join("\n")
    }
}
