//! Object identifier (SHA-1 hash)
//!
//! An object id is the 20-byte digest of an object's framed bytes. It is
//! rendered as 40 lowercase hex characters everywhere outside tree payloads
//! and index entries, which carry the raw 20 bytes.
//!
//! ## Storage
//!
//! Objects are stored in `<store>/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_SIZE};
use crate::errors::{Error, Result};
use std::path::PathBuf;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_SIZE]);

impl ObjectId {
    pub fn from_bytes(bytes: [u8; OBJECT_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse and validate a 40-character hexadecimal object id
    pub fn try_parse(id: &str) -> Result<Self> {
        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidObjectId(id.to_string()));
        }

        let mut bytes = [0u8; OBJECT_ID_SIZE];
        hex::decode_to_slice(id, &mut bytes).map_err(|_| Error::InvalidObjectId(id.to_string()))?;

        Ok(Self(bytes))
    }

    /// Build an id from the first 20 bytes of `bytes`, if there are that many
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; OBJECT_ID_SIZE] = bytes.get(..OBJECT_ID_SIZE)?.try_into().ok()?;
        Some(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Split into the fan-out directory and file name, e.g. `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let hex = self.to_hex();
        let (dir, file) = hex.split_at(2);
        PathBuf::from(dir).join(file)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl std::str::FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const EMPTY_BLOB: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

    #[test]
    fn hex_round_trips_through_parse() {
        let oid = ObjectId::try_parse(EMPTY_BLOB).unwrap();

        assert_eq!(oid.to_hex(), EMPTY_BLOB);
        assert_eq!(oid.as_bytes()[0], 0xe6);
    }

    #[test]
    fn uppercase_hex_is_normalized_to_lowercase() {
        let oid = ObjectId::try_parse(&EMPTY_BLOB.to_uppercase()).unwrap();

        assert_eq!(oid.to_string(), EMPTY_BLOB);
    }

    #[rstest]
    #[case("")]
    #[case("e69de29")]
    #[case("z69de29bb2d1d6434b8b29ae775ad8c2e48c5391")]
    #[case("e69de29bb2d1d6434b8b29ae775ad8c2e48c53910")]
    fn rejects_malformed_hex(#[case] input: &str) {
        assert!(matches!(
            ObjectId::try_parse(input),
            Err(Error::InvalidObjectId(_))
        ));
    }

    #[test]
    fn path_splits_two_character_fan_out() {
        let oid = ObjectId::try_parse(EMPTY_BLOB).unwrap();

        assert_eq!(
            oid.to_path(),
            PathBuf::from("e6").join("9de29bb2d1d6434b8b29ae775ad8c2e48c5391")
        );
    }

    #[test]
    fn from_slice_requires_twenty_bytes() {
        assert!(ObjectId::from_slice(&[0u8; 19]).is_none());
        assert_eq!(
            ObjectId::from_slice(&[1u8; 25]),
            Some(ObjectId::from_bytes([1u8; 20]))
        );
    }
}
