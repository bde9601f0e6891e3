//! Testing utilities for captag
//!
//! Provides a scratch dataset directory fixture backed by `tempfile`, with
//! helpers for laying down image files and caption sidecars.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::item::DatasetItem;

/// Scratch dataset directory that cleans up on drop
///
/// The directory and everything created under it is removed when the
/// fixture goes out of scope, ensuring tests don't leave artifacts behind.
pub struct TempDataset {
    dir: tempfile::TempDir,
}

impl TempDataset {
    /// Create a fresh scratch directory.
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dataset dir");
        Self { dir }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a placeholder image file (content is irrelevant to the core).
    pub fn add_image(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create image parent dir");
        }
        fs::write(&path, b"not-really-an-image").expect("Failed to write image file");
        path
    }

    /// Write a caption sidecar with the given text.
    pub fn add_sidecar(&self, name: &str, text: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create sidecar parent dir");
        }
        fs::write(&path, text).expect("Failed to write sidecar file");
        path
    }

    /// Create an image plus sidecar pair and load it as an item.
    ///
    /// # Panics
    /// Panics if the item cannot be loaded.
    pub fn item(&self, image: &str, sidecar: &str, text: &str) -> DatasetItem {
        let img = self.add_image(image);
        let tags = self.add_sidecar(sidecar, text);
        DatasetItem::load_default(img, tags).expect("Failed to load test item")
    }
}

impl Default for TempDataset {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for building owned tag lists in tests.
#[must_use]
pub fn tag_list(tags: &[&str]) -> Vec<String> {
    tags.iter().map(ToString::to_string).collect()
}
