//! Captag CLI application entry point
//!
//! Command-line editor for image-dataset caption sidecars: plain text
//! files of comma-separated tags living next to each image.
//!
//! # Usage
//!
//! ```bash
//! # Show every image with its tags
//! captag list ./dataset
//!
//! # Append tags to every item tagged "cat"
//! captag add ./dataset cute --if-has-tag cat
//!
//! # Rewrite a tag combination
//! captag replace ./dataset cat indoor --with "house cat"
//!
//! # Normalize tagger output and drop blacklisted tags
//! captag cleanup ./dataset
//!
//! # Soft-delete every item tagged "blurry"
//! captag rm ./dataset --if-has-tag blurry
//!
//! # Auto-tag the dataset with an external tagger, then clean and save
//! captag autotag ./dataset --threshold 0.35
//! ```
//!
//! # Configuration
//!
//! Defaults (sidecar extension, cleanup blacklist, tagger location) are
//! stored in the user's config directory
//! (`~/.config/captag/config.toml` on Linux).

use captag::{
    CaptagError,
    autotag::{AutotagError, TaggerInvocation},
    cli::{Cli, Commands},
    commands,
    commands::tag_ops::TagOp,
    config::CaptagConfig,
};
use colored::Colorize;

type Result<T> = std::result::Result<T, CaptagError>;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let config = CaptagConfig::load()?;
    let quiet = cli.quiet || config.quiet;
    let tag_ext = cli
        .tag_extension
        .clone()
        .unwrap_or_else(|| config.tag_extension.clone());

    match cli.command {
        Commands::List { dir, json } => commands::list::execute(&dir, &tag_ext, json, quiet),
        Commands::Stats { dir, top } => commands::stats::execute(&dir, &tag_ext, top, quiet),
        Commands::Add { params, tags } => commands::tag_ops::execute(
            &params.dir,
            &tag_ext,
            TagOp::Add(&tags),
            &params.if_has_tag,
            params.dry_run,
            quiet,
        ),
        Commands::Prepend { params, tags } => commands::tag_ops::execute(
            &params.dir,
            &tag_ext,
            TagOp::Prepend(&tags),
            &params.if_has_tag,
            params.dry_run,
            quiet,
        ),
        Commands::Remove { params, tags } => commands::tag_ops::execute(
            &params.dir,
            &tag_ext,
            TagOp::Remove(&tags),
            &params.if_has_tag,
            params.dry_run,
            quiet,
        ),
        Commands::Set { params, tags } => commands::tag_ops::execute(
            &params.dir,
            &tag_ext,
            TagOp::Set(&tags),
            &params.if_has_tag,
            params.dry_run,
            quiet,
        ),
        Commands::Replace { params, search, replace } => commands::tag_ops::execute(
            &params.dir,
            &tag_ext,
            TagOp::Replace { search: &search, replace: &replace },
            &params.if_has_tag,
            params.dry_run,
            quiet,
        ),
        Commands::Dedup { params } => commands::tag_ops::execute(
            &params.dir,
            &tag_ext,
            TagOp::Dedup,
            &params.if_has_tag,
            params.dry_run,
            quiet,
        ),
        Commands::Cleanup { params, extra_blacklist } => {
            let mut blacklist = config.blacklist.clone();
            blacklist.extend(extra_blacklist);
            commands::cleanup::execute(
                &params.dir,
                &tag_ext,
                &blacklist,
                &params.if_has_tag,
                params.dry_run,
                quiet,
            )
        }
        Commands::Rm { dir, if_has_tag, hard, yes } => {
            commands::remove::execute(&dir, &tag_ext, &if_has_tag, hard, yes, quiet)
        }
        Commands::Autotag { dir, threshold, tagger_path, extra_blacklist, keep_existing } => {
            let tagger_path = tagger_path
                .or_else(|| config.tagger_path.clone())
                .ok_or(CaptagError::AutotagError(AutotagError::NotConfigured))?;
            let invocation = TaggerInvocation {
                tagger_path,
                threshold: threshold.unwrap_or(config.tagger_threshold),
                caption_extension: tag_ext.clone(),
            };
            let mut blacklist = config.blacklist.clone();
            blacklist.extend(extra_blacklist);
            commands::autotag::execute(
                &dir,
                &tag_ext,
                &invocation,
                &blacklist,
                keep_existing,
                quiet,
            )
        }
    }
}
