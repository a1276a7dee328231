//! # View and Stats Subcommands
//!
//! `packstack view` renders the whole pack page; `packstack stats` prints
//! only the weight-sorted category stats. Both re-run the engine from the
//! raw pack for the selected unit system.

use anyhow::{Context, Result};
use clap::Args;

use packstack_core::{PackView, UnitSystem};

use crate::render::{render_stats, render_view};
use crate::source::{load_pack, SourceArgs};

/// Arguments for `packstack view`.
#[derive(Args, Debug)]
pub struct ViewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Unit system: metric or imperial.
    #[arg(long, short, default_value = "metric")]
    pub unit: UnitSystem,

    /// Round gram values to whole grams.
    #[arg(long)]
    pub compact: bool,

    /// Print the view as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `packstack stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Unit system: metric or imperial.
    #[arg(long, short, default_value = "metric")]
    pub unit: UnitSystem,

    /// Print the stats as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Build the page model for `args`, reporting which pack failed.
fn build_view(source: &SourceArgs, unit: UnitSystem, compact: bool) -> Result<PackView> {
    let data = load_pack(source)?;
    tracing::debug!(
        pack_id = %data.pack.id,
        categories = data.categories.len(),
        "loaded pack"
    );
    PackView::build(&data, unit, compact)
        .with_context(|| format!("pack {} has invalid data", data.pack.id))
}

/// Execute `packstack view`. Returns exit code 0 on success.
pub fn run_view(args: &ViewArgs) -> Result<u8> {
    let view = build_view(&args.source, args.unit, args.compact)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_view(&view));
    }
    Ok(0)
}

/// Execute `packstack stats`. Returns exit code 0 on success.
pub fn run_stats(args: &StatsArgs) -> Result<u8> {
    let view = build_view(&args.source, args.unit, false)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view.stats)?);
    } else {
        print!("{}", render_stats(&view.stats));
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_pack(dir: &std::path::Path, body: &str) -> PathBuf {
        let path = dir.join("pack.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    fn source(file: PathBuf) -> SourceArgs {
        SourceArgs {
            file: Some(file),
            remote: None,
            api_url: None,
        }
    }

    #[test]
    fn run_view_succeeds_for_valid_pack() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pack(
            dir.path(),
            r#"{"pack": {"id": 1, "title": "T"}, "categories": [
                {"id": 1, "name": "C", "items": [
                    {"id": 1, "name": "I", "quantity": 1, "weight": 10}
                ]}
            ]}"#,
        );
        let args = ViewArgs {
            source: source(path),
            unit: UnitSystem::Imperial,
            compact: false,
            json: true,
        };
        assert_eq!(run_view(&args).unwrap(), 0);
    }

    #[test]
    fn invalid_item_fails_with_pack_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pack(
            dir.path(),
            r#"{"pack": {"id": "p9", "title": "T"}, "categories": [
                {"id": 1, "name": "C", "items": [
                    {"id": 4, "name": "I", "quantity": -1, "weight": 10}
                ]}
            ]}"#,
        );
        let err = build_view(&source(path), UnitSystem::Metric, false).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("pack p9"), "got: {msg}");
        assert!(msg.contains("negative quantity"), "got: {msg}");
    }
}
