//! Command implementations for the captag CLI
//!
//! Each command scans a dataset, drives the core through its narrow
//! surface (selection, fan-out, flush, removal) and reports results. The
//! shared helpers here handle the scan-and-warn preamble and the
//! `--if-has-tag` selection filter.

pub mod autotag;
pub mod cleanup;
pub mod list;
pub mod remove;
pub mod stats;
pub mod tag_ops;

use std::path::Path;

use crate::dataset::Dataset;
use crate::{CaptagError, output};

type Result<T> = std::result::Result<T, CaptagError>;

/// Scan a dataset rooted at `dir`, reporting caption shortfall unless quiet.
///
/// # Errors
/// Returns scan I/O errors from the core.
pub fn open_dataset(dir: &Path, tag_extension: &str, quiet: bool) -> Result<Dataset> {
    let mut dataset = Dataset::new(dir.to_path_buf(), Some(tag_extension));
    let summary = dataset.scan()?;
    if !quiet {
        output::warn_caption_shortfall(summary.images, summary.captions);
    }
    Ok(dataset)
}

/// Select the items a bulk command applies to.
///
/// An empty filter selects everything; otherwise an item is selected iff it
/// carries ALL filter tags (`match_tags` semantics).
pub fn select_matching(dataset: &mut Dataset, filter: &[String]) {
    if filter.is_empty() {
        dataset.select_all();
    } else {
        dataset.for_all(|item| {
            let matched = item.match_tags(filter);
            item.select_set(matched);
        });
    }
}
