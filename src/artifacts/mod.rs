//! On-disk data formats
//!
//! - `objects`: framing, hashing and the blob, tree and commit payloads
//! - `index`: the binary staging index

pub mod index;
pub mod objects;
