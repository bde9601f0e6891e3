//! List command - show every image with its tags

use std::path::Path;

use serde::Serialize;

use crate::{CaptagError, commands, output};

type Result<T> = std::result::Result<T, CaptagError>;

/// JSON shape for one listed item
#[derive(Serialize)]
struct ListedItem<'a> {
    image: String,
    caption: String,
    tags: &'a [String],
    dirty: bool,
}

/// Execute the list command
///
/// # Errors
/// Returns scan errors, and serialization errors in `--json` mode.
pub fn execute(dir: &Path, tag_extension: &str, json: bool, quiet: bool) -> Result<()> {
    let dataset = commands::open_dataset(dir, tag_extension, quiet || json)?;

    if json {
        let listed: Vec<ListedItem<'_>> = dataset
            .items()
            .map(|item| ListedItem {
                image: item.image_path().display().to_string(),
                caption: item.tags_path().display().to_string(),
                tags: item.tags(),
                dirty: item.dirty(),
            })
            .collect();
        let text = serde_json::to_string_pretty(&listed)
            .map_err(|e| CaptagError::InvalidInput(format!("JSON serialization failed: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    if !quiet {
        println!("{} item(s) in {}", dataset.len(), dir.display());
    }
    for item in dataset.items() {
        println!(
            "{}",
            output::item_with_tags(item.image_path(), item.tags(), dataset.root(), quiet)
        );
    }
    Ok(())
}
