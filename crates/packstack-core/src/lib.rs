//! # packstack-core: Pack View Engine
//!
//! Turns a raw packing list (categories of items, weights stored in grams)
//! into the derived structures a read-only pack page displays: converted
//! item weights, per-category totals, a weight-sorted sidebar projection,
//! and pack-level totals, all for a selected [`UnitSystem`].
//!
//! ## Key Design Principles
//!
//! 1. **Pure functions.** [`aggregate`], [`summarize`] and [`pack_totals`]
//!    take `(categories, unit system)` explicitly and hold no state between
//!    calls. Identical input always yields identical output.
//!
//! 2. **Fail closed.** A negative weight, a negative quantity, or a
//!    non-finite weight is reported as an [`EngineError`] naming the category
//!    and item. Values are never silently coerced to zero.
//!
//! 3. **Independent conversion.** Every derived scalar is converted on its
//!    own magnitude, so a category total may be shown in kilograms while its
//!    worn weight is shown in grams.
//!
//! ## Crate Policy
//!
//! - No I/O. Fetching pack data belongs to `packstack-client`.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod aggregate;
pub mod error;
pub mod identity;
pub mod model;
pub mod units;
pub mod view;

pub use aggregate::{aggregate, pack_totals, summarize, CategoryStat, CategoryView, ItemView, PackTotals};
pub use error::{EngineError, EngineResult};
pub use identity::{CategoryId, ItemId, PackId};
pub use model::{Category, Item, Pack, PackData};
pub use units::{convert, UnitSystem, Weight, WeightUnit, GRAMS_PER_OUNCE, OUNCES_PER_POUND};
pub use view::PackView;
