use crate::areas::repository::Repository;
use crate::artifacts::index::{SIGNATURE, VERSION};

impl Repository {
    /// Dump the staging index header and entries
    pub fn ls_index(&mut self) -> anyhow::Result<()> {
        if !self.index().exists() {
            writeln!(self.writer(), "No index file found")?;
            return Ok(());
        }

        let entries = self.index().load()?;

        let mut writer = self.writer();
        writeln!(writer, "signature: {}", String::from_utf8_lossy(SIGNATURE))?;
        writeln!(writer, "version: {VERSION}")?;
        writeln!(writer, "entries: {}", entries.len())?;

        for entry in &entries {
            writeln!(writer)?;
            writeln!(writer, "path: {}", entry.name)?;
            writeln!(writer, "mode: {:o}", entry.metadata.mode)?;
            writeln!(writer, "hash: {}", entry.oid)?;
            writeln!(writer, "size: {}", entry.metadata.size)?;
            writeln!(writer, "uid: {}", entry.metadata.uid)?;
            writeln!(writer, "gid: {}", entry.metadata.gid)?;
        }

        Ok(())
    }
}
