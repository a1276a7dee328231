//! # packstack-cli: Terminal Pack Viewer
//!
//! ## Subcommands
//!
//! - `packstack view`: category tables, sidebar stats, pack totals.
//! - `packstack stats`: sidebar stats only.
//! - `packstack convert`: a single grams-to-display conversion.
//!
//! ```bash
//! packstack view pack.json --unit imperial --compact
//! packstack view --remote 1234 --json
//! packstack stats pack.json
//! packstack convert 2200 --unit imperial
//! ```
//!
//! Handlers delegate to `packstack-core`; this crate only loads input and
//! formats output.

pub mod convert;
pub mod render;
pub mod source;
pub mod view;
