//! Command implementations
//!
//! - `plumbing`: low-level access to objects and the index (hash-object,
//!   cat-file, ls-tree, write-tree, commit-tree, ls-index)
//! - `porcelain`: user-facing workflows (init, add)
//!
//! Each command is an `impl Repository` block that prints to the
//! repository's writer.

pub mod plumbing;
pub mod porcelain;
