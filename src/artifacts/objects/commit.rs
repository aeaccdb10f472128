//! Commit object
//!
//! Commits record a tree snapshot together with its parents, authorship and
//! a message.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;

const DEFAULT_AUTHOR_NAME: &str = "groot";
const DEFAULT_AUTHOR_EMAIL: &str = "groot@localhost";

/// Author or committer information
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Load author information from environment variables
    ///
    /// Reads GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL and GIT_AUTHOR_DATE, falling
    /// back to a fixed identity and the current time.
    pub fn load_from_env() -> Self {
        let name = std::env::var("GIT_AUTHOR_NAME")
            .unwrap_or_else(|_| DEFAULT_AUTHOR_NAME.to_string());
        let email = std::env::var("GIT_AUTHOR_EMAIL")
            .unwrap_or_else(|_| DEFAULT_AUTHOR_EMAIL.to_string());
        let timestamp = std::env::var("GIT_AUTHOR_DATE").ok().and_then(|date_str| {
            chrono::DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Author::new_with_timestamp(name, email, ts),
            None => Author::new(name, email),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }
}

impl TryFrom<&str> for Author {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidObject(format!("invalid author line: {reason}"));

        // split from the right: timezone, timestamp, then "name <email>"
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(invalid("expected name, email, timestamp and timezone"));
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| invalid("timestamp is not a number"))?;
        let name_email = parts[2];

        let email_start = name_email.find('<').ok_or_else(|| invalid("missing '<'"))?;
        let email_end = name_email.find('>').ok_or_else(|| invalid("missing '>'"))?;
        if email_end < email_start {
            return Err(invalid("email brackets out of order"));
        }

        let offset = chrono::DateTime::parse_from_str(
            &format!("1970-01-01 00:00:00 {timezone}"),
            "%Y-%m-%d %H:%M:%S %z",
        )
        .map_err(|_| invalid("invalid timezone"))?
        .offset()
        .to_owned();
        let timestamp = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| invalid("timestamp out of range"))?
            .with_timezone(&offset);

        Ok(Author {
            name: name_email[..email_start].trim().to_string(),
            email: name_email[email_start + 1..email_end].to_string(),
            timestamp,
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    parents: Vec<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    /// The author doubles as committer
    pub fn new(parents: Vec<ObjectId>, tree_oid: ObjectId, author: Author, message: String) -> Self {
        Commit {
            parents,
            tree_oid,
            committer: author.clone(),
            author,
            message,
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    /// Headers, a blank line, then the message verbatim plus one newline
    fn payload(&self) -> String {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        for parent in &self.parents {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.clone());

        let mut payload = lines.join("\n");
        payload.push('\n');
        payload
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        Ok(frame(self.object_type(), self.payload().as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(payload: Bytes) -> Result<Self> {
        let content = std::str::from_utf8(&payload)
            .map_err(|_| Error::InvalidObject("commit is not valid UTF-8".into()))?;
        let missing = |line: &str| Error::InvalidObject(format!("commit is missing its {line} line"));
        let (headers, body) = content
            .split_once("\n\n")
            .ok_or_else(|| missing("blank separator"))?;
        let mut lines = headers.lines();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .ok_or_else(|| missing("tree"))?
            .parse::<ObjectId>()?;

        let mut parents = Vec::new();
        let mut next_line = lines.next().ok_or_else(|| missing("author"))?;
        while let Some(parent) = next_line.strip_prefix("parent ") {
            parents.push(parent.parse::<ObjectId>()?);
            next_line = lines.next().ok_or_else(|| missing("author"))?;
        }

        let author = next_line
            .strip_prefix("author ")
            .ok_or_else(|| missing("author"))?;
        let author = Author::try_from(author)?;

        let committer = lines
            .next()
            .and_then(|line| line.strip_prefix("committer "))
            .ok_or_else(|| missing("committer"))?;
        let committer = Author::try_from(committer)?;

        let message = body.strip_suffix('\n').unwrap_or(body).to_string();

        Ok(Commit {
            parents,
            tree_oid,
            author,
            committer,
            message,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.payload()
    }
}
