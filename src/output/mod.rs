//! Output formatting for CLI display
//!
//! Path display helpers and the colored diagnostic lines used by the
//! command layer. Data-quality warnings (caption shortfall, permanent
//! deletion) go through [`warn`]; they are non-fatal and never interrupt
//! the operation that raised them.

use std::path::Path;

use colored::Colorize;

/// Format a path relative to the dataset root when possible.
#[must_use]
pub fn format_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Format an item with its tags for display
#[must_use]
pub fn item_with_tags(path: &Path, tags: &[String], root: &Path, quiet: bool) -> String {
    let path_str = format_path(path, root);

    if quiet {
        path_str
    } else if tags.is_empty() {
        format!("  {path_str} (no tags)")
    } else {
        format!("  {} [{}]", path_str, tags.join(", "))
    }
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {tag} (used by {count} image(s))")
    }
}

/// Non-fatal data-quality warning.
pub fn warn(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

/// Report a caption shortfall after a scan.
pub fn warn_caption_shortfall(images: usize, captions: usize) {
    if captions < images {
        let found = if captions == 0 {
            "no".to_string()
        } else {
            captions.to_string()
        };
        warn(&format!(
            "In dataset found {images} image files, but {found} caption files."
        ));
    }
}
