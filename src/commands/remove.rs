//! Rm command - remove images and their captions from the dataset
//!
//! Default removal is soft: both files are renamed with a `.deleted`
//! suffix and can be restored by hand. `--hard` unlinks them permanently
//! after a warning and a confirmation prompt (skippable with `--yes`).

use std::path::Path;

use dialoguer::Confirm;

use crate::dataset::RemoveMode;
use crate::{CaptagError, commands, output};

type Result<T> = std::result::Result<T, CaptagError>;

/// Execute the rm command
///
/// # Errors
/// Returns scan errors, prompt failures, and `CaptagError::BatchFailed` if
/// any item's files could not be renamed or unlinked (the remaining items
/// were still processed).
pub fn execute(
    dir: &Path,
    tag_extension: &str,
    filter: &[String],
    hard: bool,
    yes: bool,
    quiet: bool,
) -> Result<()> {
    let mut dataset = commands::open_dataset(dir, tag_extension, quiet)?;

    let mode = if filter.is_empty() {
        RemoveMode::All
    } else {
        commands::select_matching(&mut dataset, filter);
        RemoveMode::Selected
    };
    let count = match mode {
        RemoveMode::All => dataset.len(),
        RemoveMode::Selected => dataset.get_selection().len(),
    };

    if count == 0 {
        if !quiet {
            println!("No items match the specified criteria.");
        }
        return Ok(());
    }

    if hard {
        output::warn("Permanently deleting images!");
        if !yes {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Permanently delete {count} image(s) and their captions?"
                ))
                .default(false)
                .interact()
                .map_err(|e| CaptagError::InvalidInput(format!("Failed to get confirmation: {e}")))?;
            if !confirmed {
                println!("Operation cancelled.");
                return Ok(());
            }
        }
    }

    let summary = dataset.remove_images(mode, !hard);
    if !quiet {
        let kind = if hard { "permanently deleted" } else { "soft-deleted" };
        println!(
            "{} {} item(s); {} item(s) remain",
            kind,
            summary.success,
            dataset.len()
        );
    }
    if summary.has_failures() {
        summary.print("Remove");
        return Err(CaptagError::BatchFailed {
            operation: "remove".to_string(),
            failed: summary.failures.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TempDataset, tag_list};

    #[test]
    fn test_soft_remove_filtered_items() {
        let ds = TempDataset::new();
        ds.add_sidecar("a.txt", "drop me");
        ds.add_image("a.png");
        ds.add_sidecar("b.txt", "keep");
        ds.add_image("b.png");

        let filter = tag_list(&["drop me"]);
        execute(ds.root(), ".txt", &filter, false, true, true).unwrap();

        assert!(ds.path("a.png.deleted").exists());
        assert!(ds.path("a.txt.deleted").exists());
        assert!(ds.path("b.png").exists());
    }

    #[test]
    fn test_hard_remove_all_with_yes() {
        let ds = TempDataset::new();
        ds.add_image("a.png");
        ds.add_image("b.jpg");

        execute(ds.root(), ".txt", &[], true, true, true).unwrap();

        assert!(!ds.path("a.png").exists());
        assert!(!ds.path("a.txt").exists());
        assert!(!ds.path("b.jpg").exists());
        assert!(!ds.path("b.txt").exists());
    }
}
