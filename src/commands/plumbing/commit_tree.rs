use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use anyhow::Context;

impl Repository {
    /// Create a commit for `tree` and print its id; no ref is moved
    pub fn commit_tree(
        &mut self,
        tree: &str,
        parents: &[String],
        message: &str,
    ) -> anyhow::Result<()> {
        let tree_oid = ObjectId::try_parse(tree)?;
        if !self.database().exists(&tree_oid) {
            return Err(Error::ObjectNotFound(tree_oid).into());
        }

        let parents = parents
            .iter()
            .map(|parent| ObjectId::try_parse(parent))
            .collect::<Result<Vec<_>, _>>()?;

        let commit = Commit::new(
            parents,
            tree_oid,
            Author::load_from_env(),
            message.to_string(),
        );
        let commit_id = self
            .database()
            .store(&commit)
            .context("Failed to store commit object")?;
        tracing::debug!(
            %commit_id,
            tree = %commit.tree_oid(),
            parents = commit.parents().len(),
            author = commit.author().name(),
            "created commit"
        );

        writeln!(self.writer(), "{commit_id}")?;

        Ok(())
    }
}
