use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        let store_path = self.config().store_path();
        if store_path.exists() {
            writeln!(self.writer(), "Project already initialized")?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create refs/heads directory")?;

        self.refs()
            .set_head(DEFAULT_BRANCH)
            .context("Failed to create initial HEAD reference")?;

        self.index()
            .initialize()
            .context("Failed to create index file")?;

        writeln!(
            self.writer(),
            "Initialized empty groot repository in {}",
            store_path.display()
        )?;

        Ok(())
    }
}
