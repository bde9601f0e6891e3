//! Accumulate-errors report for batch operations
//!
//! Batch persistence and removal touch many files; one bad file must not
//! block the rest of the batch. Each per-item failure is recorded with its
//! path and cause, and the whole batch runs to completion before the
//! summary is reported.

use std::path::{Path, PathBuf};

use colored::Colorize;

/// One failed item within a batch operation
#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a batch operation over dataset items
#[derive(Debug, Default)]
pub struct BulkSummary {
    pub success: usize,
    pub failures: Vec<BatchFailure>,
}

impl BulkSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn add_success(&mut self) {
        self.success += 1;
    }

    pub fn add_failure(&mut self, path: &Path, error: &impl std::fmt::Display) {
        self.failures.push(BatchFailure {
            path: path.to_path_buf(),
            message: error.to_string(),
        });
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Print a colored summary block for the CLI.
    pub fn print(&self, operation: &str) {
        println!("\n{}", format!("=== {operation} Summary ===").bold());
        println!("  {} {}", "✓ Success:".green(), self.success);
        if !self.failures.is_empty() {
            println!("  {} {}", "✗ Errors:".red(), self.failures.len());
            println!("\n{}", "Error details:".red().bold());
            for failure in &self.failures {
                println!("  - {}: {}", failure.path.display(), failure.message);
            }
        }
    }
}
