//! HEAD pointer
//!
//! Only the symbolic `HEAD` written by `init` is managed here. Branch tips
//! under `refs/heads` are created as directories but never updated.

use crate::errors::{Error, IoResultExt, Result};
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

pub const HEAD_REF_NAME: &str = "HEAD";
pub const DEFAULT_BRANCH: &str = "main";

const SYMREF_PREFIX: &str = "ref: ";

#[derive(Debug, new)]
pub struct Refs {
    /// The store directory
    path: Box<Path>,
}

impl Refs {
    /// Point HEAD at `refs/heads/<branch>`
    pub fn set_head(&self, branch: &str) -> Result<()> {
        self.update_ref_file(
            &self.head_path(),
            &format!("{SYMREF_PREFIX}refs/heads/{branch}\n"),
        )
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::invalid_path(path, "ref file has no parent"))?;
        std::fs::create_dir_all(parent).with_path(parent)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_path(path)?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1).with_path(path)?;
        lock.deref_mut()
            .write_all(raw_ref.as_bytes())
            .with_path(path)?;

        Ok(())
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }
}
