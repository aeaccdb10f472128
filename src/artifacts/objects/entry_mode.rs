use crate::artifacts::objects::object_type::ObjectType;

/// Width of a canonical mode string, e.g. `040000`
const MODE_WIDTH: usize = 6;

/// Mode of a tree entry
///
/// Only the three modes the builder produces have names. Anything else read
/// from a tree payload is kept verbatim (zero-padded to six digits) and
/// classified as a blob.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    File,
    Directory,
    Submodule,
    Other(String),
}

impl EntryMode {
    /// Mode string as written into tree payloads
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::File => "100644",
            EntryMode::Directory => "40000",
            EntryMode::Submodule => "160000",
            EntryMode::Other(mode) => mode,
        }
    }

    /// Mode string left-padded with zeros to six characters
    pub fn canonical(&self) -> String {
        format!("{:0>width$}", self.as_str(), width = MODE_WIDTH)
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryMode::Directory => ObjectType::Tree,
            EntryMode::Submodule => ObjectType::Commit,
            EntryMode::File | EntryMode::Other(_) => ObjectType::Blob,
        }
    }
}

impl From<&str> for EntryMode {
    fn from(token: &str) -> Self {
        let padded = format!("{:0>width$}", token, width = MODE_WIDTH);

        match padded.as_str() {
            "100644" => EntryMode::File,
            "040000" => EntryMode::Directory,
            "160000" => EntryMode::Submodule,
            _ => EntryMode::Other(padded),
        }
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}
