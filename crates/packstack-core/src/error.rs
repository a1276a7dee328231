//! # Engine Error Types
//!
//! Validation failures raised by the conversion module and the aggregation
//! engine. Every variant that concerns an item carries the category and item
//! identifiers so the caller can report exactly which record is malformed.

use thiserror::Error;

use crate::identity::{CategoryId, ItemId};

/// Errors produced while converting or aggregating pack weights.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A weight passed to the conversion module was negative.
    #[error("weight must not be negative: {grams} g")]
    NegativeGrams { grams: f64 },

    /// A weight passed to the conversion module was NaN or infinite.
    #[error("weight must be a finite number, got {grams}")]
    NonFiniteGrams { grams: f64 },

    /// An item carries a negative unit weight.
    #[error("item {item} in category {category} has negative weight {weight} g")]
    NegativeWeight {
        category: CategoryId,
        item: ItemId,
        weight: f64,
    },

    /// An item carries a NaN or infinite unit weight.
    #[error("item {item} in category {category} has non-finite weight {weight}")]
    NonFiniteWeight {
        category: CategoryId,
        item: ItemId,
        weight: f64,
    },

    /// An item carries a negative quantity.
    #[error("item {item} in category {category} has negative quantity {quantity}")]
    NegativeQuantity {
        category: CategoryId,
        item: ItemId,
        quantity: i64,
    },

    /// An item's line weight, or a running total that includes it, exceeds
    /// the range of `f64`.
    #[error("weight of item {item} in category {category} overflows")]
    WeightOverflow { category: CategoryId, item: ItemId },

    /// A unit system string was neither `metric` nor `imperial`.
    #[error("unknown unit system {0:?}; expected \"metric\" or \"imperial\"")]
    UnknownUnitSystem(String),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
