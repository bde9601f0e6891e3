//! A single image + caption-sidecar pair
//!
//! `DatasetItem` owns the tag list for one image, its dirty/selection
//! state, and deletion of the pair. Every mutating tag operation runs a
//! deduplication pass afterwards; dirtiness is detected by comparing tag
//! COUNTS before and after the full operation, not contents. A replacement
//! that keeps the count unchanged therefore does not mark the item dirty
//! (except `set_tags`, which always does). This count-delta rule is part of
//! the on-disk compatibility contract and is exercised explicitly by the
//! tests.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::DatasetError;
use super::observer::{ObserverHandle, noop_observer};
use super::tags::{join_tags, split_tags};

type Result<T> = std::result::Result<T, DatasetError>;

/// One image file and its caption sidecar
pub struct DatasetItem {
    image_path: PathBuf,
    tags_path: PathBuf,
    tags: Vec<String>,
    selected: bool,
    dirty: bool,
    deleted: bool,
    observer: ObserverHandle,
}

impl std::fmt::Debug for DatasetItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetItem")
            .field("image_path", &self.image_path)
            .field("tags_path", &self.tags_path)
            .field("tags", &self.tags)
            .field("selected", &self.selected)
            .field("dirty", &self.dirty)
            .field("deleted", &self.deleted)
            .finish_non_exhaustive()
    }
}

impl DatasetItem {
    /// Create an item and load (or create) its sidecar.
    ///
    /// If the sidecar exists its text is parsed as tags; otherwise an empty
    /// sidecar file is created and the tag list starts empty. Either way
    /// the item starts clean.
    ///
    /// # Errors
    /// Returns `DatasetError::Io` if the sidecar cannot be read or created.
    pub fn load(
        image_path: PathBuf,
        tags_path: PathBuf,
        observer: ObserverHandle,
    ) -> Result<Self> {
        let mut item = Self {
            image_path,
            tags_path,
            tags: Vec::new(),
            selected: false,
            dirty: false,
            deleted: false,
            observer,
        };
        item.reload()?;
        Ok(item)
    }

    /// Create an item with the default no-op observer.
    ///
    /// # Errors
    /// Returns `DatasetError::Io` if the sidecar cannot be read or created.
    pub fn load_default(image_path: PathBuf, tags_path: PathBuf) -> Result<Self> {
        Self::load(image_path, tags_path, noop_observer())
    }

    #[must_use]
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    #[must_use]
    pub fn tags_path(&self) -> &Path {
        &self.tags_path
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub const fn selected(&self) -> bool {
        self.selected
    }

    #[must_use]
    pub const fn dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub const fn deleted(&self) -> bool {
        self.deleted
    }

    /// Re-read tags from the sidecar, creating it empty if missing.
    ///
    /// Discards any unsaved edits and clears `dirty`.
    ///
    /// # Errors
    /// Returns `DatasetError::Io` if the sidecar cannot be read or created.
    pub fn reload(&mut self) -> Result<()> {
        if self.tags_path.exists() {
            let text = fs::read_to_string(&self.tags_path)
                .map_err(|e| DatasetError::io(&self.tags_path, e))?;
            self.tags = split_tags(&text);
        } else {
            fs::File::create(&self.tags_path)
                .map_err(|e| DatasetError::io(&self.tags_path, e))?;
            self.tags = Vec::new();
        }
        self.mark_reset();
        Ok(())
    }

    /// Persist tags to the sidecar if dirty (or unconditionally with
    /// `force`), then clear `dirty`.
    ///
    /// This is a reset-to-clean operation: `dirty` is cleared even when
    /// nothing needed writing.
    ///
    /// # Errors
    /// Returns `DatasetError::Io` if the sidecar cannot be written; `dirty`
    /// is left set in that case.
    pub fn flush(&mut self, force: bool) -> Result<()> {
        if self.dirty || force {
            fs::write(&self.tags_path, join_tags(&self.tags, false))
                .map_err(|e| DatasetError::io(&self.tags_path, e))?;
        }
        self.mark_reset();
        Ok(())
    }

    /// Set the selection flag. The observer fires even when the value is
    /// unchanged; it receives both the previous and the new value.
    pub fn select_set(&mut self, value: bool) {
        let previous = self.selected;
        self.selected = value;
        self.observer.selected(previous, value);
    }

    /// Flip the selection flag.
    pub fn select_invert(&mut self) {
        let value = !self.selected;
        self.select_set(value);
    }

    /// Trim every tag, drop empties and remove duplicates, keeping the
    /// first occurrence and relative order. Marks the item dirty only if
    /// the list shrank.
    pub fn deduplicate(&mut self) {
        let old_len = self.tags.len();
        dedup_in_place(&mut self.tags);
        if self.tags.len() != old_len {
            self.mark_changed();
        }
    }

    /// Replace the tag list wholesale.
    ///
    /// Always marks the item dirty, even when the result equals the current
    /// tags. Intentional: a wholesale replacement counts as an edit
    /// regardless of outcome.
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
        dedup_in_place(&mut self.tags);
        self.mark_changed();
    }

    /// Insert new tags before the existing ones, then deduplicate.
    ///
    /// Marks dirty only if the final count differs from the count before
    /// the call.
    pub fn prepend_tags(&mut self, tags: &[String]) {
        let old_len = self.tags.len();
        let mut merged = tags.to_vec();
        merged.append(&mut self.tags);
        self.tags = merged;
        dedup_in_place(&mut self.tags);
        if self.tags.len() != old_len {
            self.mark_changed();
        }
    }

    /// Append new tags after the existing ones, then deduplicate.
    ///
    /// Marks dirty only if the final count differs from the count before
    /// the call.
    pub fn add_tags(&mut self, tags: &[String]) {
        let old_len = self.tags.len();
        self.tags.extend(tags.iter().cloned());
        dedup_in_place(&mut self.tags);
        if self.tags.len() != old_len {
            self.mark_changed();
        }
    }

    /// Remove every tag whose value appears in `tags`.
    ///
    /// Marks dirty only if the count shrank.
    pub fn remove_tags(&mut self, tags: &[String]) {
        let old_len = self.tags.len();
        let remove: HashSet<&str> = tags.iter().map(String::as_str).collect();
        self.tags.retain(|t| !remove.contains(t.as_str()));
        if self.tags.len() != old_len {
            self.mark_changed();
        }
    }

    /// True iff every tag in `tags` is present (AND across the query set).
    #[must_use]
    pub fn match_tags(&self, tags: &[String]) -> bool {
        tags.iter().all(|t| self.tags.contains(t))
    }

    /// Conditionally rewrite tags: when all of `search` are present, remove
    /// them and append all of `replace`. No-op (tags and dirty untouched)
    /// when the match fails. Each step applies its own change rule.
    pub fn replace_tags(&mut self, search: &[String], replace: &[String]) {
        if !self.match_tags(search) {
            return;
        }
        self.remove_tags(search);
        self.add_tags(replace);
    }

    /// Delete the image and its sidecar.
    ///
    /// Soft deletion renames both files with a `.deleted` suffix appended
    /// to the existing name (`img.png` becomes `img.png.deleted`) and
    /// refuses to overwrite an existing target. Hard deletion unlinks both
    /// files, treating already-absent files as success. `deleted` is set
    /// once the file operations succeed; the dataset prunes deleted items
    /// on its next compaction pass.
    ///
    /// # Errors
    /// * `DatasetError::DeleteCollision` if a soft-delete target exists.
    /// * `DatasetError::Io` if a rename or unlink fails.
    pub fn delete(&mut self, soft: bool) -> Result<()> {
        if soft {
            let image_target = deleted_path(&self.image_path);
            let tags_target = deleted_path(&self.tags_path);
            for target in [&image_target, &tags_target] {
                if target.exists() {
                    return Err(DatasetError::DeleteCollision { target: target.clone() });
                }
            }
            fs::rename(&self.image_path, &image_target)
                .map_err(|e| DatasetError::io(&self.image_path, e))?;
            fs::rename(&self.tags_path, &tags_target)
                .map_err(|e| DatasetError::io(&self.tags_path, e))?;
        } else {
            unlink_missing_ok(&self.image_path)?;
            unlink_missing_ok(&self.tags_path)?;
        }
        self.deleted = true;
        Ok(())
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
        self.observer.changed();
    }

    fn mark_reset(&mut self) {
        self.dirty = false;
        self.observer.reset();
    }
}

/// Trim, drop empties, dedup keeping first occurrence. Pure list transform
/// with no dirty side effect, shared by the compound tag operations.
fn dedup_in_place(tags: &mut Vec<String>) {
    let mut seen: HashSet<String> = HashSet::with_capacity(tags.len());
    let mut kept: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags.drain(..) {
        let tag = tag.trim().to_string();
        if tag.is_empty() {
            continue;
        }
        if seen.insert(tag.clone()) {
            kept.push(tag);
        }
    }
    *tags = kept;
}

/// `dir/name.ext` -> `dir/name.ext.deleted`
fn deleted_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(std::ffi::OsString::new, std::ffi::OsStr::to_os_string);
    name.push(".deleted");
    path.with_file_name(name)
}

fn unlink_missing_ok(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DatasetError::io(path, e)),
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod item_tests;
