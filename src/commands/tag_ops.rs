//! Bulk tag algebra commands: add, prepend, remove, set, replace, dedup
//!
//! Every command follows the same shape: scan, select the items the
//! `--if-has-tag` filter matches, fan the operation out with
//! `for_selected`, then flush. `--dry-run` stops before the flush and
//! reports how many items would change.

use std::path::Path;

use colored::Colorize;

use crate::dataset::DatasetItem;
use crate::{CaptagError, commands};

type Result<T> = std::result::Result<T, CaptagError>;

/// A bulk tag operation chosen by the CLI
#[derive(Debug, Clone, Copy)]
pub enum TagOp<'a> {
    Add(&'a [String]),
    Prepend(&'a [String]),
    Remove(&'a [String]),
    Set(&'a [String]),
    Replace { search: &'a [String], replace: &'a [String] },
    Dedup,
}

impl TagOp<'_> {
    const fn verb(self) -> &'static str {
        match self {
            Self::Add(_) => "Add",
            Self::Prepend(_) => "Prepend",
            Self::Remove(_) => "Remove",
            Self::Set(_) => "Set",
            Self::Replace { .. } => "Replace",
            Self::Dedup => "Dedup",
        }
    }

    fn apply(self, item: &mut DatasetItem) {
        match self {
            Self::Add(tags) => item.add_tags(tags),
            Self::Prepend(tags) => item.prepend_tags(tags),
            Self::Remove(tags) => item.remove_tags(tags),
            Self::Set(tags) => item.set_tags(tags.to_vec()),
            Self::Replace { search, replace } => item.replace_tags(search, replace),
            Self::Dedup => item.deduplicate(),
        }
    }
}

/// Execute a bulk tag operation against a dataset directory.
///
/// # Errors
/// Returns scan errors, and `CaptagError::BatchFailed` if any sidecar
/// write failed (the remaining writes still ran).
pub fn execute(
    dir: &Path,
    tag_extension: &str,
    op: TagOp<'_>,
    filter: &[String],
    dry_run: bool,
    quiet: bool,
) -> Result<()> {
    let mut dataset = commands::open_dataset(dir, tag_extension, quiet)?;
    commands::select_matching(&mut dataset, filter);

    let matched = dataset.get_selection().len();
    if matched == 0 {
        if !quiet {
            println!("No items match the specified criteria.");
        }
        return Ok(());
    }

    dataset.for_selected(|item| op.apply(item));
    let changed = dataset.unsaved_changes();

    if dry_run {
        if !quiet {
            println!("{}", "=== Dry Run Mode ===".yellow().bold());
            println!(
                "Would update {changed} of {matched} matching item(s) ({} total)",
                dataset.len()
            );
        }
        return Ok(());
    }

    let summary = dataset.flush();
    if !quiet {
        println!(
            "{}: updated {changed} of {matched} matching item(s)",
            op.verb().bold()
        );
    }
    if summary.has_failures() {
        summary.print(op.verb());
        return Err(CaptagError::BatchFailed {
            operation: op.verb().to_lowercase(),
            failed: summary.failures.len(),
        });
    }
    Ok(())
}
