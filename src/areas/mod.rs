//! Core repository components
//!
//! - `database`: compressed, content-addressed object store
//! - `index`: the staging index file and its locked read-modify-write
//! - `refs`: the HEAD pointer
//! - `repository`: wires every area from one explicit root
//! - `tree_builder`: snapshots files and directories into objects
//! - `workspace`: working directory listing and reads

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod tree_builder;
pub mod workspace;
