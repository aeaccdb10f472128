use crate::areas::repository::Repository;
use std::path::Path;

impl Repository {
    /// Print the id of a file (blob) or directory (tree)
    ///
    /// With `write`, objects are stored and files are staged. An empty
    /// directory prints nothing.
    pub fn hash_object(&mut self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let object_path = self.workspace().resolve(Path::new(object_path))?;

        let object_id = if object_path.is_dir() {
            self.tree_builder().hash_tree(&object_path, write)?
        } else {
            Some(self.tree_builder().hash_file(&object_path, write)?)
        };

        if let Some(object_id) = object_id {
            writeln!(self.writer(), "{object_id}")?;
        }

        Ok(())
    }
}
