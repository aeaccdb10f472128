//! Compressed object store
//!
//! Framed objects are zlib-compressed and stored at
//! `<objects>/<first 2 hex chars>/<remaining 38 hex chars>`. Writes go through
//! a temporary file in the fan-out directory that is renamed into place, so a
//! reader never observes a half-written object.

use crate::artifacts::objects::object::{Object, ObjectBox, digest};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoResultExt, Result};
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Persist an object, returning its id
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let framed = object.serialize()?;
        let object_id = digest(&framed);

        self.write(&object_id, &framed)?;

        Ok(object_id)
    }

    /// Compress and write framed bytes under `object_id`, replacing any previous copy
    pub fn write(&self, object_id: &ObjectId, framed: &[u8]) -> Result<()> {
        let object_path = self.object_path(object_id);
        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::invalid_path(&object_path, "object path has no parent"))?;

        std::fs::create_dir_all(object_dir).storage_at(object_dir)?;

        let compressed = Self::compress(framed).storage_at(&object_path)?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        std::fs::write(&temp_object_path, &compressed).storage_at(&temp_object_path)?;
        std::fs::rename(&temp_object_path, &object_path).storage_at(&object_path)?;

        tracing::debug!(%object_id, size = framed.len(), "stored object");

        Ok(())
    }

    /// Read and decompress the framed bytes of `object_id`
    pub fn read(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.object_path(object_id);

        let compressed = match std::fs::read(&object_path) {
            Ok(compressed) => compressed,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ObjectNotFound(*object_id));
            }
            Err(source) => {
                return Err(Error::Storage {
                    path: object_path,
                    source,
                });
            }
        };

        let framed = Self::decompress(&compressed).storage_at(&object_path)?;
        tracing::debug!(%object_id, size = framed.len(), "loaded object");

        Ok(framed)
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> Result<ObjectBox> {
        ObjectBox::from_framed(&self.read(object_id)?)
    }

    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(data: &[u8]) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::Blob;
    use crate::artifacts::objects::object::{Packable, frame};
    use crate::artifacts::objects::object_type::ObjectType;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn objects_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    fn database(dir: &TempDir) -> Database {
        Database::new(dir.path().join("objects").into_boxed_path())
    }

    #[rstest]
    fn write_then_read_returns_framed_bytes(objects_dir: TempDir) {
        let database = database(&objects_dir);
        let framed = frame(ObjectType::Blob, b"hi\n");
        let object_id = digest(&framed);

        database.write(&object_id, &framed).unwrap();

        assert_eq!(database.read(&object_id).unwrap(), framed);
    }

    #[rstest]
    fn objects_are_fanned_out_by_hash_prefix(objects_dir: TempDir) {
        let database = database(&objects_dir);

        let object_id = database.store(&Blob::new(Bytes::new())).unwrap();

        let expected = objects_dir
            .path()
            .join("objects")
            .join("e6")
            .join("9de29bb2d1d6434b8b29ae775ad8c2e48c5391");
        assert!(expected.is_file());
        assert!(database.exists(&object_id));
    }

    #[rstest]
    fn stored_bytes_are_zlib_compressed(objects_dir: TempDir) {
        let database = database(&objects_dir);
        let blob = Blob::new(Bytes::from_static(b"compress me"));

        let object_id = database.store(&blob).unwrap();

        let raw = std::fs::read(database.object_path(&object_id)).unwrap();
        let mut decoder = flate2::read::ZlibDecoder::new(raw.as_slice());
        let mut inflated = Vec::new();
        decoder.read_to_end(&mut inflated).unwrap();
        assert_eq!(Bytes::from(inflated), blob.serialize().unwrap());
    }

    #[rstest]
    fn rewriting_an_object_is_idempotent(objects_dir: TempDir) {
        let database = database(&objects_dir);
        let blob = Blob::new(Bytes::from_static(b"same"));

        let first = database.store(&blob).unwrap();
        let second = database.store(&blob).unwrap();

        assert_eq!(first, second);
        let fan_out = database.object_path(&first);
        let siblings = std::fs::read_dir(fan_out.parent().unwrap()).unwrap().count();
        assert_eq!(siblings, 1);
    }

    #[rstest]
    fn reading_missing_object_is_not_found(objects_dir: TempDir) {
        let database = database(&objects_dir);
        let object_id = ObjectId::from_bytes([7; 20]);

        assert!(matches!(
            database.read(&object_id),
            Err(Error::ObjectNotFound(missing)) if missing == object_id
        ));
    }

    #[rstest]
    fn corrupt_object_is_a_storage_error(objects_dir: TempDir) {
        let database = database(&objects_dir);
        let object_id = ObjectId::from_bytes([9; 20]);
        let object_path = database.object_path(&object_id);
        std::fs::create_dir_all(object_path.parent().unwrap()).unwrap();
        std::fs::write(&object_path, b"not zlib").unwrap();

        assert!(matches!(
            database.read(&object_id),
            Err(Error::Storage { .. })
        ));
    }
}
