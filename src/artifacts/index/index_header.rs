use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::errors::{Error, Result};
use byteorder::{ByteOrder, NetworkEndian};
use bytes::{BufMut, BytesMut};
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub version: u32,
    pub entries_count: u32,
}

impl IndexHeader {
    pub fn for_entries(entries_count: u32) -> Self {
        IndexHeader::new(VERSION, entries_count)
    }

    pub fn write_to(&self, bytes: &mut BytesMut) {
        bytes.put_slice(SIGNATURE);
        bytes.put_u32(self.version);
        bytes.put_u32(self.entries_count);
    }

    /// Validate the signature and version at the start of `bytes`
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::InvalidIndex(format!(
                "header needs {HEADER_SIZE} bytes, found {}",
                bytes.len()
            )));
        }

        if &bytes[0..4] != SIGNATURE {
            return Err(Error::InvalidIndex(format!(
                "bad signature {:?}",
                String::from_utf8_lossy(&bytes[0..4])
            )));
        }

        let version = NetworkEndian::read_u32(&bytes[4..8]);
        if version != VERSION {
            return Err(Error::InvalidIndex(format!(
                "unsupported version {version}"
            )));
        }

        Ok(IndexHeader::new(version, NetworkEndian::read_u32(&bytes[8..12])))
    }
}
