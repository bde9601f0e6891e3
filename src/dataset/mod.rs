//! Dataset core: an ordered collection of image + caption-sidecar pairs
//!
//! A [`Dataset`] is discovered from a directory tree and owns the bulk
//! operations over its [`DatasetItem`]s: selection, fan-out of tag
//! operations, batch flush and soft/hard removal. The core is synchronous
//! and single-threaded; every public operation runs to completion or fails
//! before returning, and a host layer drives it through the narrow surface
//! re-exported here.

pub mod error;
pub mod item;
pub mod observer;
pub mod summary;
pub mod tags;

use std::path::{Path, PathBuf};

use glob::MatchOptions;

pub use error::DatasetError;
pub use item::DatasetItem;
pub use observer::{ItemObserver, NoopObserver, ObserverHandle, noop_observer};
pub use summary::{BatchFailure, BulkSummary};
pub use tags::{join_tags, split_tags};

type Result<T> = std::result::Result<T, DatasetError>;

/// Image extensions discovered by a scan (matched case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Default sidecar extension.
pub const DEFAULT_TAG_EXTENSION: &str = ".txt";

/// Constructs items during a scan.
///
/// Replaces class-level item polymorphism: a host wanting richer items
/// (e.g. ones wired to UI observers) supplies its own factory instead of
/// subclassing.
pub type ItemFactory = Box<dyn Fn(PathBuf, PathBuf) -> Result<DatasetItem>>;

/// What a scan found, so the host can report caption shortfall.
#[derive(Debug, Clone, Copy)]
pub struct ScanSummary {
    /// Image files discovered
    pub images: usize,
    /// Sidecar files that already existed before the scan created the rest
    pub captions: usize,
}

impl ScanSummary {
    #[must_use]
    pub const fn captions_missing(&self) -> usize {
        self.images - self.captions
    }
}

/// Which items a removal applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveMode {
    /// Only items with `selected = true`
    Selected,
    /// Every active item
    All,
}

/// An ordered collection of dataset items discovered from a directory
pub struct Dataset {
    root: PathBuf,
    items: Vec<DatasetItem>,
    tag_extension: String,
    factory: ItemFactory,
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("root", &self.root)
            .field("items", &self.items)
            .field("tag_extension", &self.tag_extension)
            .finish_non_exhaustive()
    }
}

impl Dataset {
    /// Create an empty dataset rooted at `root` with the default item
    /// factory. `tag_extension` defaults to `.txt`; a missing leading dot
    /// is tolerated.
    #[must_use]
    pub fn new(root: PathBuf, tag_extension: Option<&str>) -> Self {
        Self::with_factory(
            root,
            tag_extension,
            Box::new(|image, tags| DatasetItem::load(image, tags, noop_observer())),
        )
    }

    /// Create an empty dataset with a custom item factory.
    #[must_use]
    pub fn with_factory(root: PathBuf, tag_extension: Option<&str>, factory: ItemFactory) -> Self {
        let ext = tag_extension.unwrap_or(DEFAULT_TAG_EXTENSION);
        let tag_extension = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{ext}")
        };
        Self { root, items: Vec::new(), tag_extension, factory }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn tag_extension(&self) -> &str {
        &self.tag_extension
    }

    /// Recursively discover images under the root and (re)build the item
    /// list wholesale. Sidecars are counted before item construction, so
    /// the summary reflects how many captions existed prior to the scan
    /// creating the missing ones.
    ///
    /// Scan order: extension groups in [`IMAGE_EXTENSIONS`] order, paths
    /// within a group in glob order. Matching is case-insensitive.
    ///
    /// # Errors
    /// Returns `DatasetError::Io` if a directory cannot be read or an item
    /// fails to load its sidecar; `DatasetError::ScanPattern` if the root
    /// produces an invalid glob pattern.
    pub fn scan(&mut self) -> Result<ScanSummary> {
        self.items.clear();
        let mut captions = 0;

        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::default()
        };

        // The root is a literal path, not pattern syntax; escape it so
        // directories like `set[1]` still scan.
        let root = glob::Pattern::escape(&self.root.display().to_string());

        for ext in IMAGE_EXTENSIONS {
            let pattern = format!("{root}/**/*.{ext}");
            let entries = glob::glob_with(&pattern, options).map_err(|e| {
                DatasetError::ScanPattern { pattern: pattern.clone(), message: e.to_string() }
            })?;

            for entry in entries {
                let image_path = match entry {
                    Ok(path) => path,
                    Err(e) => {
                        let path = e.path().to_path_buf();
                        return Err(DatasetError::io(path, e.into_error()));
                    }
                };
                if !image_path.is_file() {
                    continue;
                }
                let tags_path =
                    image_path.with_extension(self.tag_extension.trim_start_matches('.'));
                if tags_path.exists() {
                    captions += 1;
                }
                self.items.push((self.factory)(image_path, tags_path)?);
            }
        }

        Ok(ScanSummary { images: self.items.len(), captions })
    }

    /// Active (non-deleted) items in scan order.
    pub fn items(&self) -> impl Iterator<Item = &DatasetItem> {
        self.items.iter().filter(|i| !i.deleted())
    }

    fn items_mut(&mut self) -> impl Iterator<Item = &mut DatasetItem> {
        self.items.iter_mut().filter(|i| !i.deleted())
    }

    /// Count of active items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count of active items with unsaved tag edits.
    #[must_use]
    pub fn unsaved_changes(&self) -> usize {
        self.items().filter(|i| i.dirty()).count()
    }

    /// Active selected items, in scan order.
    #[must_use]
    pub fn get_selection(&self) -> Vec<&DatasetItem> {
        self.items().filter(|i| i.selected()).collect()
    }

    /// Apply `op` to every active item, in scan order.
    pub fn for_all(&mut self, mut op: impl FnMut(&mut DatasetItem)) {
        for item in self.items_mut() {
            op(item);
        }
    }

    /// Apply `op` to every active selected item, in scan order.
    pub fn for_selected(&mut self, mut op: impl FnMut(&mut DatasetItem)) {
        for item in self.items_mut() {
            if item.selected() {
                op(item);
            }
        }
    }

    pub fn select_all(&mut self) {
        self.for_all(|item| item.select_set(true));
    }

    pub fn select_none(&mut self) {
        self.for_all(|item| item.select_set(false));
    }

    pub fn select_invert(&mut self) {
        self.for_all(DatasetItem::select_invert);
    }

    /// Flush every active item. Per-item write failures are collected
    /// instead of aborting the batch; the failed items keep their dirty
    /// flag.
    #[must_use]
    pub fn flush(&mut self) -> BulkSummary {
        let mut summary = BulkSummary::new();
        for item in self.items_mut() {
            let tags_path = item.tags_path().to_path_buf();
            match item.flush(false) {
                Ok(()) => summary.add_success(),
                Err(e) => summary.add_failure(&tags_path, &e),
            }
        }
        summary
    }

    /// Delete the selected (or all) active items, then compact the item
    /// list. Two-phase: every applicable item is marked and its files
    /// renamed/unlinked first, then items that were successfully deleted
    /// are pruned. Per-item failures accumulate in the summary and leave
    /// the item active.
    #[must_use]
    pub fn remove_images(&mut self, mode: RemoveMode, soft: bool) -> BulkSummary {
        let mut summary = BulkSummary::new();
        for item in self.items_mut() {
            let applies = match mode {
                RemoveMode::All => true,
                RemoveMode::Selected => item.selected(),
            };
            if !applies {
                continue;
            }
            let image_path = item.image_path().to_path_buf();
            match item.delete(soft) {
                Ok(()) => summary.add_success(),
                Err(e) => summary.add_failure(&image_path, &e),
            }
        }
        self.items.retain(|i| !i.deleted());
        summary
    }
}
