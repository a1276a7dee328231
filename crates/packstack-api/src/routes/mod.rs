//! # API Route Modules
//!
//! - `packs`: shared pack views and sidebar stats.

pub mod packs;
