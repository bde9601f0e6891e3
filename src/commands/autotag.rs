//! Autotag command - run the external tagger, then clean and persist
//!
//! The tagger overwrites caption sidecars in place; the core's only
//! involvement is re-scanning afterwards and applying the ordinary cleanup
//! pass (underscore stripping plus blacklist removal) before flushing.
//! Existing captions are wiped first unless `--keep-existing` is given,
//! matching the tagger's expectation of a clean slate.

use std::fs;
use std::path::Path;

use colored::Colorize;

use crate::autotag::TaggerInvocation;
use crate::commands::cleanup::cleanup_selection;
use crate::{CaptagError, commands, output};

type Result<T> = std::result::Result<T, CaptagError>;

/// Execute the autotag command
///
/// # Errors
/// Returns scan errors, tagger launch/exit errors, and
/// `CaptagError::BatchFailed` if the final flush had per-item failures.
pub fn execute(
    dir: &Path,
    tag_extension: &str,
    invocation: &TaggerInvocation,
    blacklist: &[String],
    keep_existing: bool,
    quiet: bool,
) -> Result<()> {
    let mut dataset = commands::open_dataset(dir, tag_extension, true)?;

    if !keep_existing {
        for item in dataset.items() {
            match fs::remove_file(item.tags_path()) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(CaptagError::IoError(e)),
            }
        }
    }

    if !quiet {
        println!(
            "Running tagger {} (threshold {})...",
            invocation.tagger_path.display(),
            invocation.threshold
        );
    }
    invocation.run(dir)?;

    // The tagger rewrote sidecars behind our back; rebuild from disk.
    let summary = dataset.scan()?;
    if !quiet {
        output::warn_caption_shortfall(summary.images, summary.captions);
    }

    dataset.select_all();
    cleanup_selection(&mut dataset, blacklist);

    let flush = dataset.flush();
    if !quiet {
        println!(
            "{} tagged and cleaned {} item(s)",
            "✓".green(),
            flush.success
        );
    }
    if flush.has_failures() {
        flush.print("Autotag");
        return Err(CaptagError::BatchFailed {
            operation: "autotag".to_string(),
            failed: flush.failures.len(),
        });
    }
    Ok(())
}
