//! Staging index file format
//!
//! The index records every tracked file with its stat metadata and blob id.
//!
//! ## File Format (Version 2)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 2 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length):
//!   - 62 fixed bytes, the path and a NUL terminator
//!   - zero padding up to the next multiple of 8 bytes
//! ```
//!
//! All integers are big-endian. Anything after the last declared entry is
//! ignored when parsing.

pub mod index_entry;
pub mod index_file;
pub mod index_header;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &[u8; 4] = b"DIRC";

/// Index file format version
pub const VERSION: u32 = 2;
