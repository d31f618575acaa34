use assert_cmd::Command;
use predicates::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

fn build_archive(path: &Path) {
    let mut zip = zip::ZipWriter::new(fs::File::create(path).unwrap());
    zip.add_directory("docs/", SimpleFileOptions::default()).unwrap();
    zip.start_file("docs/guide.md", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"# Guide\n").unwrap();
    zip.start_file("docs/api/index.html", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"<html></html>").unwrap();
    zip.start_file("README", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"read me").unwrap();
    zip.add_directory("empty/", SimpleFileOptions::default()).unwrap();
    zip.finish().unwrap();
}

/// Relative path -> file contents (None for directories).
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| entry.unwrap())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let content = if entry.file_type().is_dir() {
                None
            } else {
                Some(fs::read(entry.path()).unwrap())
            };
            (relative, content)
        })
        .collect()
}

fn extract_zip() -> Command {
    Command::cargo_bin("extract-zip").unwrap()
}

#[test]
fn bulk_and_progress_modes_produce_the_same_tree() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("bundle.zip");
    build_archive(&archive);

    let bulk = temp_dir.path().join("bulk");
    let stepped = temp_dir.path().join("stepped");

    extract_zip()
        .current_dir(temp_dir.path())
        .arg(&archive)
        .arg("--directory")
        .arg(&bulk)
        .assert()
        .success();

    extract_zip()
        .current_dir(temp_dir.path())
        .arg(&archive)
        .arg("-d")
        .arg(&stepped)
        .arg("-p")
        .assert()
        .success();

    let bulk_tree = snapshot(&bulk);
    assert!(bulk_tree.contains_key(Path::new("docs/api/index.html")));
    assert!(bulk_tree.contains_key(Path::new("empty")));
    assert_eq!(bulk_tree, snapshot(&stepped));
}

#[test]
fn defaults_to_current_directory() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("bundle.zip");
    build_archive(&archive);

    extract_zip()
        .current_dir(temp_dir.path())
        .arg("bundle.zip")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("docs/guide.md")).unwrap(),
        "# Guide\n"
    );
}

#[test]
fn missing_archive_exits_with_one() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("out");

    extract_zip()
        .current_dir(temp_dir.path())
        .arg("missing.zip")
        .arg("-d")
        .arg(&dest)
        .assert()
        .code(1);

    assert!(!dest.exists());
}

#[test]
fn truncated_archive_exits_with_one() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("bundle.zip");
    build_archive(&archive);
    let bytes = fs::read(&archive).unwrap();
    fs::write(&archive, &bytes[..bytes.len() / 3]).unwrap();

    let dest = temp_dir.path().join("out");

    extract_zip()
        .current_dir(temp_dir.path())
        .arg(&archive)
        .arg("-d")
        .arg(&dest)
        .arg("--show-progress")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bundle.zip"));

    assert!(!dest.exists());
}

#[test]
fn json_report_counts_skipped_entries() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("mixed.zip");
    {
        let mut zip = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
        zip.start_file("ok.txt", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"fine").unwrap();
        zip.start_file("../outside.txt", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"escape").unwrap();
        zip.finish().unwrap();
    }

    let dest = temp_dir.path().join("out");
    let output = extract_zip()
        .current_dir(temp_dir.path())
        .arg(&archive)
        .arg("-d")
        .arg(&dest)
        .arg("-p")
        .arg("--output-format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "per_entry");
    assert_eq!(report["total_entries"], 2);
    assert_eq!(report["extracted_entries"], 1);
    assert_eq!(report["skipped_entries"].as_array().unwrap().len(), 1);
    assert!(dest.join("ok.txt").exists());
    assert!(!temp_dir.path().join("outside.txt").exists());
}

#[test]
fn bulk_mode_fails_on_escaping_entry() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("mixed.zip");
    {
        let mut zip = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
        zip.start_file("ok.txt", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"fine").unwrap();
        zip.start_file("../outside.txt", SimpleFileOptions::default()).unwrap();
        zip.write_all(b"escape").unwrap();
        zip.finish().unwrap();
    }

    let dest = temp_dir.path().join("out");

    extract_zip()
        .current_dir(temp_dir.path())
        .arg(&archive)
        .arg("-d")
        .arg(&dest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to extract"));

    assert!(!temp_dir.path().join("outside.txt").exists());
}

#[test]
fn broken_generator_table_does_not_block_extraction() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("bundle.zip");
    build_archive(&archive);
    fs::write(
        temp_dir.path().join("bashutils.toml"),
        "[generator]\narray_name = 42\n\n[extractor]\nprogress_label = \"Unpacking\"\n",
    )
    .unwrap();

    let dest = temp_dir.path().join("out");

    extract_zip()
        .current_dir(temp_dir.path())
        .arg("bundle.zip")
        .arg("-d")
        .arg(&dest)
        .assert()
        .success();

    assert!(dest.join("README").exists());
}

#[test]
fn archive_argument_is_required() {
    extract_zip().assert().failure();
}
