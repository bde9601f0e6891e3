//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for captag using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **list**: Show every image with its tags
//! - **stats**: Dataset counters and tag frequencies
//! - **add/prepend/remove/set/replace/dedup**: Bulk tag algebra
//! - **cleanup**: Underscore-stripping and blacklist pass
//! - **rm**: Soft or permanent removal of images and their captions
//! - **autotag**: Run the external tagger, then clean and persist
//!
//! # Design Features
//!
//! - Global `--quiet` flag for scripting-friendly output
//! - Global `--tag-ext` to override the sidecar extension
//! - `--if-has-tag` filters limit bulk commands to matching items
//! - Command aliases (e.g., `a` for `add`, `c` for `cleanup`)

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parameters shared by every bulk tag command
#[derive(Debug, Clone, clap::Args)]
pub struct BulkParams {
    /// Dataset directory to scan
    pub dir: PathBuf,

    /// Only touch items carrying ALL of these tags
    #[arg(long = "if-has-tag", value_name = "TAG")]
    pub if_has_tag: Vec<String>,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Captag - edit caption/tag sidecars for image training datasets
#[derive(Parser, Debug)]
#[command(name = "captag", version, about, long_about = None)]
pub struct Cli {
    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Sidecar extension (default from config, usually .txt)
    #[arg(short = 'e', long = "tag-ext", global = true, value_name = "EXT")]
    pub tag_extension: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every image with its tags
    #[command(alias = "l")]
    List {
        /// Dataset directory to scan
        dir: PathBuf,
        /// Emit the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show dataset counters and the most frequent tags
    #[command(alias = "st")]
    Stats {
        /// Dataset directory to scan
        dir: PathBuf,
        /// How many of the most frequent tags to show
        #[arg(long, default_value_t = 20, value_name = "N")]
        top: usize,
    },

    /// Append tags to matching items
    #[command(alias = "a")]
    Add {
        #[command(flatten)]
        params: BulkParams,
        /// Tags to append
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Insert tags before the existing ones on matching items
    #[command(alias = "p")]
    Prepend {
        #[command(flatten)]
        params: BulkParams,
        /// Tags to prepend
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Remove tags from matching items
    #[command(alias = "r")]
    Remove {
        #[command(flatten)]
        params: BulkParams,
        /// Tags to remove
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Replace the whole tag list of matching items
    Set {
        #[command(flatten)]
        params: BulkParams,
        /// The new tag list
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Rewrite tags: items carrying ALL search tags lose them and gain the
    /// replacements
    Replace {
        #[command(flatten)]
        params: BulkParams,
        /// Tags that must all be present
        #[arg(required = true)]
        search: Vec<String>,
        /// Tags added in their place
        #[arg(long = "with", required = true, value_name = "TAG")]
        replace: Vec<String>,
    },

    /// Trim, drop empties and deduplicate tags on matching items
    #[command(alias = "d")]
    Dedup {
        #[command(flatten)]
        params: BulkParams,
    },

    /// Strip underscores from long tags and drop blacklisted tags
    #[command(alias = "c")]
    Cleanup {
        #[command(flatten)]
        params: BulkParams,
        /// Extra tags to drop on top of the configured blacklist
        #[arg(long = "blacklist", value_name = "TAG")]
        extra_blacklist: Vec<String>,
    },

    /// Remove images and their captions from the dataset
    Rm {
        /// Dataset directory to scan
        dir: PathBuf,
        /// Only remove items carrying ALL of these tags (default: all items)
        #[arg(long = "if-has-tag", value_name = "TAG")]
        if_has_tag: Vec<String>,
        /// Permanently delete files instead of renaming with .deleted
        #[arg(long)]
        hard: bool,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Auto-tag the dataset with the external tagger, then clean and save
    Autotag {
        /// Dataset directory to scan
        dir: PathBuf,
        /// Confidence threshold handed to the tagger
        #[arg(long, value_name = "T")]
        threshold: Option<f64>,
        /// Tagger executable (overrides the configured tagger_path)
        #[arg(long = "tagger-path", value_name = "PATH")]
        tagger_path: Option<PathBuf>,
        /// Extra tags to drop during the cleanup pass
        #[arg(long = "blacklist", value_name = "TAG")]
        extra_blacklist: Vec<String>,
        /// Keep existing captions instead of wiping them first
        #[arg(long)]
        keep_existing: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_with_filter_and_alias() {
        let cli = Cli::parse_from(["captag", "a", "/data", "new", "--if-has-tag", "old"]);
        match cli.command {
            Commands::Add { params, tags } => {
                assert_eq!(params.dir, PathBuf::from("/data"));
                assert_eq!(params.if_has_tag, vec!["old"]);
                assert_eq!(tags, vec!["new"]);
                assert!(!params.dry_run);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_replace_requires_with() {
        assert!(Cli::try_parse_from(["captag", "replace", "/data", "old"]).is_err());
        let cli = Cli::parse_from(["captag", "replace", "/data", "old", "--with", "new"]);
        match cli.command {
            Commands::Replace { search, replace, .. } => {
                assert_eq!(search, vec!["old"]);
                assert_eq!(replace, vec!["new"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["captag", "-q", "list", "/data", "--json"]);
        assert!(cli.quiet);
        let cli = Cli::parse_from(["captag", "--tag-ext", ".caption", "stats", "/data"]);
        assert_eq!(cli.tag_extension.as_deref(), Some(".caption"));
    }
}
