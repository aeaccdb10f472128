use crate::areas::repository::Repository;
use std::path::Path;

impl Repository {
    /// Store and stage each path in order; directories are added recursively
    ///
    /// Every path is resolved before anything is written, so a typo in the
    /// last argument leaves the store untouched.
    pub fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let paths = paths
            .iter()
            .map(|path| self.workspace().resolve(Path::new(path)))
            .collect::<Result<Vec<_>, _>>()?;

        for path in paths {
            if path.is_dir() {
                self.tree_builder().hash_tree(&path, true)?;
            } else {
                self.tree_builder().hash_file(&path, true)?;
            }
        }

        Ok(())
    }
}
