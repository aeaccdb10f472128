use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use common::{
    HI_BLOB_ID, groot_output, init_repository_dir, repository_dir, run_groot_command,
    write_random_file,
};
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

fn staged_paths(dir: &TempDir) -> Vec<String> {
    groot_output(dir.path(), &["ls-index"])
        .lines()
        .filter_map(|line| line.strip_prefix("path: "))
        .map(str::to_string)
        .collect()
}

fn add_args(names: &[String]) -> Vec<&str> {
    std::iter::once("add")
        .chain(names.iter().map(String::as_str))
        .collect()
}

#[rstest]
fn ls_index_without_index_reports_it(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_groot_command(repository_dir.path(), &["ls-index"])
        .assert()
        .success()
        .stdout(predicate::eq("No index file found\n"));

    Ok(())
}

#[rstest]
fn add_single_file_to_index_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("a.txt").write_str("hi\n")?;

    run_groot_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_groot_command(init_repository_dir.path(), &["ls-index"])
        .assert()
        .success()
        .stdout(predicate::str::contains("signature: DIRC\n"))
        .stdout(predicate::str::contains("version: 2\n"))
        .stdout(predicate::str::contains("entries: 1\n"))
        .stdout(predicate::str::contains("path: a.txt\n"))
        .stdout(predicate::str::contains("mode: 100644\n"))
        .stdout(predicate::str::contains(format!("hash: {HI_BLOB_ID}\n")))
        .stdout(predicate::str::contains("size: 3\n"));

    Ok(())
}

#[rstest]
fn add_multiple_files_to_index_incrementally_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let file_names = (0..5)
        .map(|_| write_random_file(&init_repository_dir))
        .collect::<Vec<_>>();

    run_groot_command(init_repository_dir.path(), &add_args(&file_names[..2]))
        .assert()
        .success();
    run_groot_command(init_repository_dir.path(), &add_args(&file_names[2..]))
        .assert()
        .success();

    assert_eq!(staged_paths(&init_repository_dir), file_names);

    Ok(())
}

#[rstest]
fn re_adding_a_path_keeps_a_single_entry(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("a.txt").write_str("one\n")?;
    init_repository_dir.child("b.txt").write_str("two\n")?;
    groot_output(init_repository_dir.path(), &["add", "a.txt", "b.txt"]);

    init_repository_dir.child("a.txt").write_str("hi\n")?;
    groot_output(init_repository_dir.path(), &["add", "a.txt"]);
    groot_output(init_repository_dir.path(), &["add", "a.txt"]);

    assert_eq!(staged_paths(&init_repository_dir), vec!["b.txt", "a.txt"]);
    let listing = groot_output(init_repository_dir.path(), &["ls-index"]);
    assert!(listing.contains("entries: 2"));
    assert!(listing.contains(&format!("hash: {HI_BLOB_ID}")));

    Ok(())
}

#[rstest]
fn add_directory_stages_nested_files_with_forward_slashes(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("docs/guide/intro.md").write_str("# intro\n")?;

    groot_output(init_repository_dir.path(), &["add", "docs"]);

    assert_eq!(
        staged_paths(&init_repository_dir),
        vec!["docs/guide/intro.md"]
    );

    Ok(())
}

#[rstest]
fn add_with_a_missing_path_stages_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("a.txt").write_str("hi\n")?;

    run_groot_command(init_repository_dir.path(), &["add", "a.txt", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.txt"));

    assert!(staged_paths(&init_repository_dir).is_empty());

    Ok(())
}

#[rstest]
fn corrupt_index_fails_closed(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let index_path = init_repository_dir.path().join(".groot").join("index");
    std::fs::write(&index_path, b"XXXX\0\0\0\x02\0\0\0\x00")?;
    init_repository_dir.child("a.txt").write_str("hi\n")?;

    run_groot_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid index file"));
    run_groot_command(init_repository_dir.path(), &["ls-index"])
        .assert()
        .failure();

    assert_eq!(std::fs::read(&index_path)?, b"XXXX\0\0\0\x02\0\0\0\x00".to_vec());

    Ok(())
}

#[rstest]
#[case(b"DIRC\0\0\0\x02\0\0\0\x01")]
#[case(b"DIRC\0\0\0\x02\xff\xff\xff\xff")]
fn index_declaring_missing_entries_is_rejected(
    init_repository_dir: TempDir,
    #[case] header: &[u8; 12],
) -> Result<(), Box<dyn std::error::Error>> {
    let index_path = init_repository_dir.path().join(".groot").join("index");
    std::fs::write(&index_path, header)?;
    init_repository_dir.child("a.txt").write_str("hi\n")?;

    run_groot_command(init_repository_dir.path(), &["ls-index"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid index file"));
    run_groot_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid index file"));

    assert_eq!(std::fs::read(&index_path)?, header.to_vec());

    Ok(())
}

#[rstest]
fn concurrent_adds_keep_every_entry(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let file_names = (0..8)
        .map(|_| write_random_file(&init_repository_dir))
        .collect::<Vec<_>>();

    let handles = file_names
        .iter()
        .map(|file_name| {
            std::process::Command::new(assert_cmd::cargo::cargo_bin("groot"))
                .current_dir(init_repository_dir.path())
                .args(["add", file_name.as_str()])
                .spawn()
        })
        .collect::<Result<Vec<_>, _>>()?;
    for mut handle in handles {
        assert!(handle.wait()?.success());
    }

    let mut staged = staged_paths(&init_repository_dir);
    staged.sort();
    let mut expected = file_names.clone();
    expected.sort();
    assert_eq!(staged, expected);

    Ok(())
}
