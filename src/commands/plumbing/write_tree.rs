use crate::areas::repository::Repository;

impl Repository {
    /// Store the whole working directory and print the root tree id
    pub fn write_tree(&mut self) -> anyhow::Result<()> {
        let root = self.path().to_path_buf();

        match self.tree_builder().hash_tree(&root, true)? {
            Some(tree_id) => writeln!(self.writer(), "{tree_id}")?,
            None => tracing::debug!(root = %root.display(), "nothing to snapshot"),
        }

        Ok(())
    }
}
