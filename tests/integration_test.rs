//! Integration tests for captag
//!
//! These tests verify end-to-end dataset workflows against real scratch
//! directories: scanning, bulk tag editing, persistence and removal.

use std::fs;
use std::path::{Path, PathBuf};

use captag::dataset::{Dataset, RemoveMode, split_tags};

fn setup_dataset_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

fn create_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"fake image bytes").unwrap();
    path
}

fn create_sidecar(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn test_scan_mixed_dataset() {
    let dir = setup_dataset_dir();
    create_image(dir.path(), "a.png");
    create_image(dir.path(), "b.jpg");
    create_sidecar(dir.path(), "b.txt", "x, y");

    let mut dataset = Dataset::new(dir.path().to_path_buf(), None);
    let summary = dataset.scan().unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(summary.captions_missing(), 1);

    let a = dataset
        .items()
        .find(|i| i.image_path().ends_with("a.png"))
        .unwrap();
    assert!(a.tags().is_empty());
    assert!(!a.dirty());
    // The scan created the missing sidecar, empty
    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "");

    let b = dataset
        .items()
        .find(|i| i.image_path().ends_with("b.jpg"))
        .unwrap();
    assert_eq!(b.tags(), ["x", "y"]);
}

#[test]
fn test_bulk_edit_and_flush_round_trip() {
    let dir = setup_dataset_dir();
    create_image(dir.path(), "one.png");
    create_sidecar(dir.path(), "one.txt", "x, y");
    create_image(dir.path(), "two.png");
    create_sidecar(dir.path(), "two.txt", "y");

    let mut dataset = Dataset::new(dir.path().to_path_buf(), None);
    dataset.scan().unwrap();

    dataset.for_all(|item| item.add_tags(&tags(&["x", "z"])));
    assert_eq!(dataset.unsaved_changes(), 2);

    let summary = dataset.flush();
    assert_eq!(summary.success, 2);
    assert_eq!(dataset.unsaved_changes(), 0);

    assert_eq!(
        split_tags(&fs::read_to_string(dir.path().join("one.txt")).unwrap()),
        tags(&["x", "y", "z"])
    );
    assert_eq!(
        split_tags(&fs::read_to_string(dir.path().join("two.txt")).unwrap()),
        tags(&["y", "x", "z"])
    );

    // A fresh dataset sees the persisted state
    let mut reread = Dataset::new(dir.path().to_path_buf(), None);
    reread.scan().unwrap();
    assert_eq!(reread.unsaved_changes(), 0);
}

#[test]
fn test_selection_driven_removal() {
    let dir = setup_dataset_dir();
    for name in ["a.png", "b.png", "c.png"] {
        create_image(dir.path(), name);
    }

    let mut dataset = Dataset::new(dir.path().to_path_buf(), None);
    dataset.scan().unwrap();

    dataset.for_all(|item| {
        if item.image_path().ends_with("a.png") || item.image_path().ends_with("c.png") {
            item.select_set(true);
        }
    });
    assert_eq!(dataset.get_selection().len(), 2);

    let summary = dataset.remove_images(RemoveMode::Selected, true);
    assert_eq!(summary.success, 2);
    assert_eq!(dataset.len(), 1);

    assert!(dir.path().join("a.png.deleted").exists());
    assert!(dir.path().join("a.txt.deleted").exists());
    assert!(dir.path().join("c.png.deleted").exists());
    assert!(dir.path().join("b.png").exists());
}

#[test]
fn test_hard_removal_of_everything() {
    let dir = setup_dataset_dir();
    create_image(dir.path(), "a.png");
    create_image(dir.path(), "sub/b.jpeg");

    let mut dataset = Dataset::new(dir.path().to_path_buf(), None);
    dataset.scan().unwrap();
    assert_eq!(dataset.len(), 2);

    let summary = dataset.remove_images(RemoveMode::All, false);
    assert_eq!(summary.success, 2);
    assert!(dataset.is_empty());

    assert!(!dir.path().join("a.png").exists());
    assert!(!dir.path().join("a.txt").exists());
    assert!(!dir.path().join("sub/b.jpeg").exists());
    assert!(!dir.path().join("sub/b.txt").exists());
}

#[test]
fn test_custom_tag_extension() {
    let dir = setup_dataset_dir();
    create_image(dir.path(), "a.png");
    create_sidecar(dir.path(), "a.caption", "x");

    let mut dataset = Dataset::new(dir.path().to_path_buf(), Some(".caption"));
    let summary = dataset.scan().unwrap();
    assert_eq!(summary.captions, 1);

    let item = dataset.items().next().unwrap();
    assert_eq!(item.tags(), ["x"]);
    assert!(item.tags_path().ends_with("a.caption"));
}

#[test]
fn test_replace_flow_through_dataset() {
    let dir = setup_dataset_dir();
    create_image(dir.path(), "a.png");
    create_sidecar(dir.path(), "a.txt", "cat, indoor, fluffy");
    create_image(dir.path(), "b.png");
    create_sidecar(dir.path(), "b.txt", "cat, outdoor");

    let mut dataset = Dataset::new(dir.path().to_path_buf(), None);
    dataset.scan().unwrap();

    let search = tags(&["cat", "indoor"]);
    let replace = tags(&["house cat"]);
    dataset.for_all(|item| item.replace_tags(&search, &replace));
    let summary = dataset.flush();
    assert!(!summary.has_failures());

    assert_eq!(
        fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        "fluffy, house cat"
    );
    // No full match: untouched
    assert_eq!(
        fs::read_to_string(dir.path().join("b.txt")).unwrap(),
        "cat, outdoor"
    );
}
