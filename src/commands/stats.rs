//! Stats command - dataset counters and tag frequencies

use std::collections::HashMap;
use std::path::Path;

use colored::Colorize;

use crate::dataset::Dataset;
use crate::{CaptagError, output};

type Result<T> = std::result::Result<T, CaptagError>;

/// Execute the stats command
///
/// # Errors
/// Returns scan errors from the core.
pub fn execute(dir: &Path, tag_extension: &str, top: usize, quiet: bool) -> Result<()> {
    let mut dataset = Dataset::new(dir.to_path_buf(), Some(tag_extension));
    let summary = dataset.scan()?;

    if quiet {
        println!("{} {}", summary.images, summary.captions);
        return Ok(());
    }

    println!("{}", format!("=== {} ===", dir.display()).bold());
    println!("  Images:           {}", summary.images);
    println!("  Captions found:   {}", summary.captions);
    if summary.captions_missing() > 0 {
        println!(
            "  {} {}",
            "Captions missing:".yellow(),
            summary.captions_missing()
        );
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut untagged = 0usize;
    for item in dataset.items() {
        if item.tags().is_empty() {
            untagged += 1;
        }
        for tag in item.tags() {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }
    println!("  Distinct tags:    {}", counts.len());
    println!("  Untagged images:  {untagged}");

    if top > 0 && !counts.is_empty() {
        let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
        // Frequency descending, alphabetical within ties
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        println!("\n{}", "Most frequent tags:".bold());
        for (tag, count) in sorted.into_iter().take(top) {
            println!("{}", output::tag_with_count(tag, count, false));
        }
    }
    Ok(())
}
