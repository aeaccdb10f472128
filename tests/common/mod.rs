#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::lorem::en::{Word, Words};
use rstest::fixture;
use std::path::{Path, PathBuf};

pub const EMPTY_BLOB_ID: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";
pub const HI_BLOB_ID: &str = "45b983be36b73c0788dc9cbcb76cbb80fc7bb057";
pub const HI_TREE_ID: &str = "0d8a474fc67971fb3dd7616e26323d3066442555";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_groot_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_groot_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("groot").expect("Failed to find groot binary");
    cmd.current_dir(dir);
    cmd.env_remove("GROOT_DIR");
    cmd.env_remove("GROOT_SORT_ENTRIES");
    cmd.env_remove("GROOT_LOG");
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", "groot"),
        ("GIT_AUTHOR_EMAIL", "groot@localhost"),
        ("GIT_AUTHOR_DATE", "2024-01-01 00:00:00 +0000"),
    ]);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Trimmed stdout of a successful command
pub fn groot_output(dir: &Path, args: &[&str]) -> String {
    let output = run_groot_command(dir, args)
        .output()
        .expect("Failed to run groot");
    assert!(
        output.status.success(),
        "groot {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout)
        .expect("stdout is not UTF-8")
        .trim()
        .to_string()
}

/// Write a file with a random name and random words, returning its name
pub fn write_random_file(dir: &TempDir) -> String {
    let file_name = format!("{}-{}.txt", Word().fake::<String>(), (0..1_000_000).fake::<u32>());
    let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
    dir.child(&file_name)
        .write_str(&file_content)
        .expect("Failed to write file");

    file_name
}

pub fn object_path(dir: &Path, object_id: &str) -> PathBuf {
    dir.join(".groot")
        .join("objects")
        .join(&object_id[..2])
        .join(&object_id[2..])
}

pub fn count_objects(dir: &Path) -> usize {
    let objects = dir.join(".groot").join("objects");
    if !objects.exists() {
        return 0;
    }

    walkdir::WalkDir::new(objects)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count()
}
