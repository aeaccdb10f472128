//! Plumbing commands
//!
//! - `cat-file`: print an object's content, type or size
//! - `commit-tree`: create a commit object from a tree
//! - `hash-object`: compute a file or directory id and optionally store it
//! - `ls-index`: dump the staging index
//! - `ls-tree`: list the entries of a tree
//! - `write-tree`: snapshot the whole working directory

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_index;
pub mod ls_tree;
pub mod write_tree;
