use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Error;

impl Repository {
    /// List a tree's entries; a commit id lists the commit's tree
    pub fn ls_tree(&mut self, object_id: &str, name_only: bool) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id)?;
        let tree = self.load_tree(&object_id)?;

        for entry in tree.entries() {
            if name_only {
                writeln!(self.writer(), "{}", entry.name)?;
            } else {
                writeln!(self.writer(), "{entry}")?;
            }
        }

        Ok(())
    }

    fn load_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        match self.database().parse_object(object_id)? {
            ObjectBox::Tree(tree) => Ok(tree),
            ObjectBox::Commit(commit) => match self.database().parse_object(commit.tree_oid())? {
                ObjectBox::Tree(tree) => Ok(tree),
                _ => Err(Error::InvalidObject("commit does not point at a tree".into()).into()),
            },
            ObjectBox::Blob(_) => Err(Error::InvalidObject("not a tree object".into()).into()),
        }
    }
}
