//! Porcelain commands
//!
//! - `init`: create the store directory layout
//! - `add`: store files and stage them in the index

pub mod add;
pub mod init;
