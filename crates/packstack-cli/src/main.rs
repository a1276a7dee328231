//! # packstack CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use packstack_cli::convert::{run_convert, ConvertArgs};
use packstack_cli::view::{run_stats, run_view, StatsArgs, ViewArgs};

/// Packstack pack viewer.
///
/// Renders a shared packing list with per-category weights in metric or
/// imperial units.
#[derive(Parser, Debug)]
#[command(name = "packstack", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render category tables, sidebar stats and pack totals.
    View(ViewArgs),

    /// Print per-category stats sorted by weight, heaviest first.
    Stats(StatsArgs),

    /// Convert a weight in grams to its display unit.
    Convert(ConvertArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::View(args) => run_view(&args),
        Commands::Stats(args) => run_stats(&args),
        Commands::Convert(args) => run_convert(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn view_requires_a_source() {
        assert!(Cli::try_parse_from(["packstack", "view"]).is_err());
    }

    #[test]
    fn view_rejects_file_and_remote_together() {
        assert!(Cli::try_parse_from(["packstack", "view", "p.json", "--remote", "12"]).is_err());
    }

    #[test]
    fn unknown_unit_is_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["packstack", "convert", "10", "--unit", "stone"]).is_err());
    }

    #[test]
    fn convert_accepts_imperial() {
        let cli = Cli::try_parse_from(["packstack", "-v", "convert", "2200", "-u", "imperial"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Convert(args) => assert_eq!(args.unit, packstack_core::UnitSystem::Imperial),
            other => panic!("expected convert, got {other:?}"),
        }
    }
}
