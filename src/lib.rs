//! Captag - a caption/tag sidecar editor for image training datasets
//!
//! This library models a directory of images paired with comma-separated
//! tag sidecar files, and provides the tag-set algebra applied to them in
//! bulk or individually: set/add/prepend/remove/replace/match/deduplicate,
//! with dirty-tracking, selection tracking and safe (soft/hard) deletion.

use thiserror::Error;

pub mod autotag;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod output;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum CaptagError {
    /// Dataset or item operation error
    #[error("Dataset error: {0}")]
    DatasetError(#[from] dataset::DatasetError),
    /// External tagger invocation error
    #[error("Autotag error: {0}")]
    AutotagError(#[from] autotag::AutotagError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A batch operation completed with per-item failures
    #[error("{failed} item(s) failed during {operation}")]
    BatchFailed { operation: String, failed: usize },
}
