use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::tree_builder::TreeBuilder;
use crate::areas::workspace::Workspace;
use crate::config::RepositoryConfig;
use crate::errors::{Error, IoResultExt};
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// All areas of one repository, rooted at an explicit directory
///
/// Commands are implemented as `impl Repository` blocks under
/// `crate::commands` and print through the injected writer.
pub struct Repository {
    path: Box<Path>,
    config: RepositoryConfig,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Index,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// The root must already be a directory; nothing is created here
    pub fn new(config: RepositoryConfig, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !config.root().is_dir() {
            return Err(Error::invalid_path(config.root(), "no such directory").into());
        }
        let path = config
            .root()
            .canonicalize()
            .with_path(config.root())?;
        let config = RepositoryConfig {
            root: path.clone(),
            ..config
        };

        let index = Index::new(config.index_path().into_boxed_path());
        let database = Database::new(config.objects_path().into_boxed_path());
        let workspace = Workspace::new(
            path.clone().into_boxed_path(),
            config.ignored_names(),
            config.entry_order,
        );
        let refs = Refs::new(config.store_path().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            config,
            writer: RefCell::new(writer),
            index,
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn tree_builder(&'_ self) -> TreeBuilder<'_> {
        TreeBuilder::new(&self.database, &self.workspace, &self.index)
    }
}
