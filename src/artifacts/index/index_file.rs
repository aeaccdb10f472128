//! Whole-file codec for the staging index
//!
//! These functions are pure byte transforms. Reading and writing the index
//! file on disk is left to `areas::index`.

use crate::artifacts::index::index_entry::{
    ENTRY_FIXED_SIZE, EntryMetadata, IndexEntry, padding_len,
};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use byteorder::{ByteOrder, NetworkEndian};
use bytes::{Bytes, BytesMut};

/// Parse an index file into its entries, in file order
///
/// Fails closed: any entry that would run past the buffer makes the whole
/// parse fail with `InvalidIndex`.
pub fn parse(bytes: &[u8]) -> Result<Vec<IndexEntry>> {
    let header = IndexHeader::parse(bytes)?;
    // the declared count is untrusted; the smallest entry bounds what can fit
    let fits = (bytes.len() - HEADER_SIZE) / (ENTRY_FIXED_SIZE + 2);
    let mut entries = Vec::with_capacity(fits.min(header.entries_count as usize));
    let mut offset = HEADER_SIZE;

    for position in 0..header.entries_count {
        let (entry, size) = parse_entry(&bytes[offset..])
            .map_err(|reason| Error::InvalidIndex(format!("entry {position}: {reason}")))?;
        entries.push(entry);
        offset += size;
    }

    Ok(entries)
}

fn parse_entry(bytes: &[u8]) -> std::result::Result<(IndexEntry, usize), String> {
    if bytes.len() < ENTRY_FIXED_SIZE {
        return Err(format!(
            "needs {ENTRY_FIXED_SIZE} fixed bytes, found {}",
            bytes.len()
        ));
    }

    let field = |index: usize| NetworkEndian::read_u32(&bytes[index * 4..index * 4 + 4]);
    let metadata = EntryMetadata {
        ctime: field(0),
        ctime_nsec: field(1),
        mtime: field(2),
        mtime_nsec: field(3),
        dev: field(4),
        ino: field(5),
        mode: field(6),
        uid: field(7),
        gid: field(8),
        size: field(9),
        flags: NetworkEndian::read_u16(&bytes[60..62]),
    };
    let oid = ObjectId::from_slice(&bytes[40..60]).ok_or("truncated object id")?;

    let path_bytes = &bytes[ENTRY_FIXED_SIZE..];
    let path_len = path_bytes
        .iter()
        .position(|&b| b == 0)
        .ok_or("path is missing its NUL terminator")?;
    let name = std::str::from_utf8(&path_bytes[..path_len])
        .map_err(|_| "path is not valid UTF-8".to_string())?
        .to_string();

    let size = ENTRY_FIXED_SIZE + path_len + 1 + padding_len(path_len);
    if size > bytes.len() {
        return Err("padding runs past the end of the file".to_string());
    }

    Ok((IndexEntry::new(name, oid, metadata), size))
}

/// Serialize entries, in the given order, into a complete index file
pub fn serialize(entries: &[IndexEntry]) -> Bytes {
    let size = HEADER_SIZE + entries.iter().map(IndexEntry::disk_size).sum::<usize>();
    let mut bytes = BytesMut::with_capacity(size);

    IndexHeader::for_entries(entries.len() as u32).write_to(&mut bytes);
    for entry in entries {
        entry.write_to(&mut bytes);
    }

    bytes.freeze()
}

/// Insert `entry`, replacing any entry with the same path
///
/// Unrelated entries keep their order; the upserted path always moves to the
/// end. A missing index yields a fresh one holding only `entry`.
pub fn upsert(existing: Option<&[u8]>, entry: IndexEntry) -> Result<Bytes> {
    let mut entries = match existing {
        Some(bytes) => parse(bytes)?,
        None => Vec::new(),
    };

    entries.retain(|existing| existing.name != entry.name);
    entries.push(entry);

    Ok(serialize(&entries))
}
