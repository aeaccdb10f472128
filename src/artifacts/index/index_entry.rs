//! Index entry representation
//!
//! Each entry in the index represents a tracked file with:
//! - File path (UTF-8, relative to the repository root, `/`-separated)
//! - Content hash (blob id)
//! - File metadata (raw stat fields)
//!
//! ## Entry Format
//!
//! ```text
//! 10 x u32   ctime, ctime_nsec, mtime, mtime_nsec, dev, ino, mode, uid, gid, size
//! 20 bytes   blob id
//! u16        flags (low 12 bits: path length, capped at 0xFFF)
//! path NUL   followed by zero padding to a multiple of 8 bytes
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use bytes::{BufMut, BytesMut};
use derive_new::new;
use std::cmp::min;
use std::fs::Metadata;
use std::os::unix::prelude::MetadataExt;

/// Largest path length the flags field can carry
pub const MAX_PATH_SIZE: usize = 0xFFF;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Size of the fixed part of an entry: 10 x u32, a 20-byte id and u16 flags
pub const ENTRY_FIXED_SIZE: usize = 62;

#[derive(Debug, Clone, PartialEq, Eq, Default, new)]
pub struct IndexEntry {
    /// Path relative to repository root
    pub name: String,
    /// Blob id of the file content
    pub oid: ObjectId,
    pub metadata: EntryMetadata,
}

/// Stat fields as stored on disk, truncated to 32 bits
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryMetadata {
    pub ctime: u32,
    pub ctime_nsec: u32,
    pub mtime: u32,
    pub mtime_nsec: u32,
    pub dev: u32,
    pub ino: u32,
    /// Raw OS mode bits, not a tree mode
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
    pub flags: u16,
}

impl IndexEntry {
    /// Build an entry from a file's stat data, computing the flags from the path
    pub fn from_stat(name: String, oid: ObjectId, metadata: &Metadata) -> Self {
        let flags = path_flags(&name);

        IndexEntry {
            name,
            oid,
            metadata: EntryMetadata {
                ctime: metadata.ctime() as u32,
                ctime_nsec: metadata.ctime_nsec() as u32,
                mtime: metadata.mtime() as u32,
                mtime_nsec: metadata.mtime_nsec() as u32,
                dev: metadata.dev() as u32,
                ino: metadata.ino() as u32,
                mode: metadata.mode(),
                uid: metadata.uid(),
                gid: metadata.gid(),
                size: metadata.size() as u32,
                flags,
            },
        }
    }

    /// Total on-disk length including the NUL terminator and padding
    pub fn disk_size(&self) -> usize {
        let unpadded = ENTRY_FIXED_SIZE + self.name.len() + 1;
        unpadded + padding_len(self.name.len())
    }

    pub fn write_to(&self, bytes: &mut BytesMut) {
        let metadata = &self.metadata;

        for field in [
            metadata.ctime,
            metadata.ctime_nsec,
            metadata.mtime,
            metadata.mtime_nsec,
            metadata.dev,
            metadata.ino,
            metadata.mode,
            metadata.uid,
            metadata.gid,
            metadata.size,
        ] {
            bytes.put_u32(field);
        }
        bytes.put_slice(self.oid.as_bytes());
        bytes.put_u16(metadata.flags);
        bytes.put_slice(self.name.as_bytes());

        // at least one NUL, then pad to the next ENTRY_BLOCK boundary
        bytes.put_u8(0);
        bytes.put_bytes(0, padding_len(self.name.len()));
    }
}

/// Low 12 bits of the flags field for a path
pub fn path_flags(name: &str) -> u16 {
    min(name.len(), MAX_PATH_SIZE) as u16
}

/// Zero bytes following the NUL terminator of a path of `path_len` bytes
pub fn padding_len(path_len: usize) -> usize {
    let unpadded = ENTRY_FIXED_SIZE + path_len + 1;
    (ENTRY_BLOCK - unpadded % ENTRY_BLOCK) % ENTRY_BLOCK
}
