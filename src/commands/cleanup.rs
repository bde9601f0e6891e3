//! Cleanup command - strip underscores from long tags, drop blacklisted tags
//!
//! This is the post-tagger normalization pass: external taggers emit
//! `snake_case` tags and a handful of labels the user never wants to keep.
//! Runs over the whole dataset (or the `--if-has-tag` selection) and
//! persists every touched sidecar.

use std::path::Path;

use crate::autotag::strip_underscores;
use crate::dataset::Dataset;
use crate::{CaptagError, commands};

type Result<T> = std::result::Result<T, CaptagError>;

/// Apply the cleanup pass to every selected item.
///
/// `set_tags` marks every touched item dirty regardless of outcome, so the
/// subsequent flush rewrites each selected sidecar once.
pub fn cleanup_selection(dataset: &mut Dataset, blacklist: &[String]) {
    dataset.for_selected(|item| {
        let cleaned = strip_underscores(item.tags());
        item.set_tags(cleaned);
        item.remove_tags(blacklist);
    });
}

/// Execute the cleanup command
///
/// # Errors
/// Returns scan errors, and `CaptagError::BatchFailed` if any sidecar
/// write failed.
pub fn execute(
    dir: &Path,
    tag_extension: &str,
    blacklist: &[String],
    filter: &[String],
    dry_run: bool,
    quiet: bool,
) -> Result<()> {
    let mut dataset = commands::open_dataset(dir, tag_extension, quiet)?;
    commands::select_matching(&mut dataset, filter);

    let matched = dataset.get_selection().len();
    cleanup_selection(&mut dataset, blacklist);

    if dry_run {
        if !quiet {
            println!("Would clean {matched} item(s)");
        }
        return Ok(());
    }

    let summary = dataset.flush();
    if !quiet {
        println!("Cleaned {matched} item(s)");
    }
    if summary.has_failures() {
        summary.print("Cleanup");
        return Err(CaptagError::BatchFailed {
            operation: "cleanup".to_string(),
            failed: summary.failures.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TempDataset, tag_list};
    use std::fs;

    #[test]
    fn test_cleanup_strips_underscores_and_blacklist() {
        let ds = TempDataset::new();
        ds.add_sidecar("a.txt", "long_tag, ^_^, lowres, keeper");
        ds.add_image("a.png");

        let blacklist = tag_list(&["lowres"]);
        execute(ds.root(), ".txt", &blacklist, &[], false, true).unwrap();

        assert_eq!(
            fs::read_to_string(ds.path("a.txt")).unwrap(),
            "long tag, ^_^, keeper"
        );
    }

    #[test]
    fn test_cleanup_rewrites_even_clean_items() {
        let ds = TempDataset::new();
        // Padded separators get normalized by the rewrite
        ds.add_sidecar("a.txt", "a,b");
        ds.add_image("a.png");

        execute(ds.root(), ".txt", &[], &[], false, true).unwrap();
        assert_eq!(fs::read_to_string(ds.path("a.txt")).unwrap(), "a, b");
    }
}
