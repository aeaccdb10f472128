//! Object framing and content hashing
//!
//! Every object is hashed and stored as `"<kind> <payload-length>\0<payload>"`.
//! The id of an object is the SHA-1 digest of exactly those framed bytes.

use crate::artifacts::objects::OBJECT_ID_SIZE;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use bytes::{BufMut, Bytes, BytesMut};
use sha1::{Digest, Sha1};

/// Prefix `payload` with its `"<kind> <len>\0"` header
pub fn frame(kind: ObjectType, payload: &[u8]) -> Bytes {
    let header = format!("{} {}\0", kind.as_str(), payload.len());

    let mut framed = BytesMut::with_capacity(header.len() + payload.len());
    framed.put_slice(header.as_bytes());
    framed.put_slice(payload);
    framed.freeze()
}

/// SHA-1 of already framed bytes
pub fn digest(framed: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(framed);

    let mut bytes = [0u8; OBJECT_ID_SIZE];
    bytes.copy_from_slice(&hasher.finalize());
    ObjectId::from_bytes(bytes)
}

/// Split framed bytes into their kind and payload
///
/// The declared length must match the payload that follows the header.
pub fn unframe(framed: &Bytes) -> Result<(ObjectType, Bytes)> {
    let space = framed
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::InvalidObject("missing object type terminator".into()))?;
    let nul = framed[space..]
        .iter()
        .position(|&b| b == 0)
        .map(|offset| space + offset)
        .ok_or_else(|| Error::InvalidObject("missing object header terminator".into()))?;

    let kind = std::str::from_utf8(&framed[..space])
        .map_err(|_| Error::InvalidObject("object type is not valid UTF-8".into()))?;
    let kind = ObjectType::try_from(kind)?;

    let declared = std::str::from_utf8(&framed[space + 1..nul])
        .ok()
        .and_then(|size| size.parse::<usize>().ok())
        .ok_or_else(|| Error::InvalidObject("invalid object size".into()))?;

    let payload = framed.slice(nul + 1..);
    if payload.len() != declared {
        return Err(Error::InvalidObject(format!(
            "declared size {declared} does not match payload size {}",
            payload.len()
        )));
    }

    Ok((kind, payload))
}

pub trait Packable {
    /// Framed bytes, ready to hash and store
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Rebuild from a payload whose frame header has already been stripped
    fn deserialize(payload: Bytes) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> Result<ObjectId> {
        Ok(digest(&self.serialize()?))
    }
}

/// Any object read back from the store
#[derive(Debug, Clone)]
pub enum ObjectBox {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl ObjectBox {
    pub fn from_framed(framed: &Bytes) -> Result<Self> {
        let (kind, payload) = unframe(framed)?;

        Ok(match kind {
            ObjectType::Blob => ObjectBox::Blob(Blob::deserialize(payload)?),
            ObjectType::Tree => ObjectBox::Tree(Tree::deserialize(payload)?),
            ObjectType::Commit => ObjectBox::Commit(Commit::deserialize(payload)?),
        })
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(_) => ObjectType::Blob,
            ObjectBox::Tree(_) => ObjectType::Tree,
            ObjectBox::Commit(_) => ObjectType::Commit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn empty_blob_has_well_known_hash() {
        let framed = frame(ObjectType::Blob, b"");

        assert_eq!(framed.as_ref(), b"blob 0\0");
        assert_eq!(
            digest(&framed).to_string(),
            "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391"
        );
    }

    #[test]
    fn frame_uses_decimal_byte_length() {
        let framed = frame(ObjectType::Tree, &[0u8; 120]);

        assert!(framed.starts_with(b"tree 120\0"));
        assert_eq!(framed.len(), "tree 120\0".len() + 120);
    }

    #[test]
    fn unframe_splits_kind_and_payload() {
        let framed = frame(ObjectType::Commit, b"tree abc\n");

        let (kind, payload) = unframe(&framed).unwrap();

        assert_eq!(kind, ObjectType::Commit);
        assert_eq!(payload.as_ref(), b"tree abc\n");
    }

    #[test]
    fn unframe_rejects_size_mismatch() {
        let framed = Bytes::from_static(b"blob 10\0short");

        assert!(matches!(unframe(&framed), Err(Error::InvalidObject(_))));
    }

    #[test]
    fn unframe_rejects_missing_header() {
        let framed = Bytes::from_static(b"no-header-here");

        assert!(matches!(unframe(&framed), Err(Error::InvalidObject(_))));
    }

    proptest! {
        #[test]
        fn blob_digest_is_stable(content in proptest::collection::vec(any::<u8>(), 0..512)) {
            let first = digest(&frame(ObjectType::Blob, &content));
            let second = digest(&frame(ObjectType::Blob, &content));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn unframe_inverts_frame(content in proptest::collection::vec(any::<u8>(), 0..512)) {
            let framed = frame(ObjectType::Blob, &content);
            let (kind, payload) = unframe(&framed).unwrap();
            prop_assert_eq!(kind, ObjectType::Blob);
            prop_assert_eq!(payload.as_ref(), content.as_slice());
        }
    }
}
