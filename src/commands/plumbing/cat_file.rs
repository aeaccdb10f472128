use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox, unframe};
use crate::artifacts::objects::object_id::ObjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Pretty-print the content
    Pretty,
    /// Print the object type
    Type,
    /// Print the payload size in bytes
    Size,
}

impl Repository {
    pub fn cat_file(&mut self, object_id: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id)?;
        let framed = self.database().read(&object_id)?;

        match mode {
            CatFileMode::Type => {
                let (kind, _) = unframe(&framed)?;
                writeln!(self.writer(), "{kind}")?;
            }
            CatFileMode::Size => {
                let (_, payload) = unframe(&framed)?;
                writeln!(self.writer(), "{}", payload.len())?;
            }
            CatFileMode::Pretty => match ObjectBox::from_framed(&framed)? {
                ObjectBox::Blob(blob) => {
                    self.writer().write_all(blob.content())?;
                }
                ObjectBox::Tree(tree) => {
                    if !tree.is_empty() {
                        writeln!(self.writer(), "{}", tree.display())?;
                    }
                }
                ObjectBox::Commit(commit) => {
                    write!(self.writer(), "{}", commit.display())?;
                }
            },
        }

        Ok(())
    }
}
