//! External auto-tagger invocation
//!
//! The tagger is a black box: it receives the dataset root and a confidence
//! threshold, and overwrites caption sidecars in place. The tool location
//! lives on the invocation context and is supplied by the caller (from
//! config or a CLI flag); there is no process-wide tagger path.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Errors raised while running the external tagger
#[derive(Debug, Error)]
pub enum AutotagError {
    /// The tagger executable could not be started
    #[error("Failed to launch tagger '{path}': {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tagger ran but exited unsuccessfully
    #[error("Tagger exited with {status}")]
    ToolFailed { status: ExitStatus },

    /// No tagger path was supplied by flag or config
    #[error("No tagger configured; pass --tagger-path or set tagger_path in the config")]
    NotConfigured,
}

/// One tagger run: tool location plus its tuning knobs
#[derive(Debug, Clone)]
pub struct TaggerInvocation {
    pub tagger_path: PathBuf,
    pub threshold: f64,
    pub caption_extension: String,
}

impl TaggerInvocation {
    /// Run the tagger against `dataset_root`, blocking until it exits.
    ///
    /// The tagger inherits stdout/stderr so its progress is visible.
    ///
    /// # Errors
    /// * `AutotagError::Spawn` if the process cannot be started.
    /// * `AutotagError::ToolFailed` if it exits with a non-zero status.
    pub fn run(&self, dataset_root: &Path) -> Result<(), AutotagError> {
        let status = Command::new(&self.tagger_path)
            .arg(dataset_root)
            .arg(format!("--thresh={}", self.threshold))
            .arg(format!("--caption_extension={}", self.caption_extension))
            .status()
            .map_err(|source| AutotagError::Spawn { path: self.tagger_path.clone(), source })?;

        if status.success() {
            Ok(())
        } else {
            Err(AutotagError::ToolFailed { status })
        }
    }
}

/// Replace underscores with spaces in tags longer than 3 characters.
///
/// Short tags are left alone: emoticon-style tags like `^_^` would be
/// mangled by the substitution.
#[must_use]
pub fn strip_underscores(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| {
            if tag.chars().count() > 3 {
                tag.replace('_', " ")
            } else {
                tag.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::tag_list;

    #[test]
    fn test_strip_underscores_spares_short_tags() {
        let tags = tag_list(&["^_^", "o_o", "long_tag", "multi_word_tag"]);
        assert_eq!(
            strip_underscores(&tags),
            tag_list(&["^_^", "o_o", "long tag", "multi word tag"])
        );
    }

    #[test]
    fn test_strip_underscores_boundary_length() {
        // Exactly 3 chars is spared; 4 is not
        let tags = tag_list(&["a_b", "a_bc"]);
        assert_eq!(strip_underscores(&tags), tag_list(&["a_b", "a bc"]));
    }

    #[test]
    fn test_failing_tool_reports_status() {
        let invocation = TaggerInvocation {
            tagger_path: PathBuf::from("false"),
            threshold: 0.35,
            caption_extension: ".txt".to_string(),
        };
        match invocation.run(Path::new(".")) {
            Err(AutotagError::ToolFailed { .. }) => {}
            other => panic!("expected ToolFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_tool_reports_spawn_failure() {
        let invocation = TaggerInvocation {
            tagger_path: PathBuf::from("/no/such/tagger"),
            threshold: 0.35,
            caption_extension: ".txt".to_string(),
        };
        match invocation.run(Path::new(".")) {
            Err(AutotagError::Spawn { .. }) => {}
            other => panic!("expected Spawn error, got {other:?}"),
        }
    }
}
