//! # Convert Subcommand
//!
//! Converts one weight in grams to its display value and unit.

use anyhow::Result;
use clap::Args;

use packstack_core::{convert, UnitSystem};

/// Arguments for `packstack convert`.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Weight in grams.
    #[arg(value_name = "GRAMS", allow_negative_numbers = true)]
    pub grams: f64,

    /// Unit system: metric or imperial.
    #[arg(long, short, default_value = "metric")]
    pub unit: UnitSystem,

    /// Round gram values to whole grams.
    #[arg(long)]
    pub compact: bool,
}

/// Execute `packstack convert`. Returns exit code 0 on success.
pub fn run_convert(args: &ConvertArgs) -> Result<u8> {
    let mut weight = convert(args.grams, args.unit)?;
    if args.compact {
        weight = weight.compact();
    }
    println!("{weight}");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_valid_weight() {
        let args = ConvertArgs {
            grams: 2200.0,
            unit: UnitSystem::Imperial,
            compact: false,
        };
        assert_eq!(run_convert(&args).unwrap(), 0);
    }

    #[test]
    fn negative_weight_is_error() {
        let args = ConvertArgs {
            grams: -5.0,
            unit: UnitSystem::Metric,
            compact: true,
        };
        let err = run_convert(&args).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }
}
