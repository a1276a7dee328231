//! # Unit Conversion
//!
//! Converts a weight held in grams into a display value and unit for a
//! selected [`UnitSystem`].
//!
//! ## Display Rules
//!
//! | System   | Magnitude        | Unit | Rounding   |
//! |----------|------------------|------|------------|
//! | Metric   | `< 1000 g`       | g    | 2 decimals |
//! | Metric   | `>= 1000 g`      | kg   | 2 decimals |
//! | Imperial | `< 16 oz`        | oz   | 1 decimal  |
//! | Imperial | `>= 16 oz`       | lb   | 2 decimals |
//!
//! `1 oz = 28.3495 g`, `1 lb = 16 oz`. The magnitude compared against a
//! threshold is the value already rounded in the smaller unit, so a display
//! never reads `1000 g` or `16 oz`. Thresholds switch up on `>=`, and the
//! unit chosen never steps down as the weight grows. Compact display rounds
//! gram values to the nearest whole gram (see [`Weight::compact`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};

/// Grams in one avoirdupois ounce.
pub const GRAMS_PER_OUNCE: f64 = 28.3495;

/// Ounces in one pound.
pub const OUNCES_PER_POUND: f64 = 16.0;

/// Grams in one kilogram.
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// The unit system selected by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// All unit systems, in selector order.
    pub const ALL: [UnitSystem; 2] = [UnitSystem::Metric, UnitSystem::Imperial];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = EngineError;

    /// Case-insensitive; anything other than `metric` or `imperial` is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            _ => Err(EngineError::UnknownUnitSystem(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for UnitSystem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A concrete mass unit used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "oz")]
    Ounces,
    #[serde(rename = "lb")]
    Pounds,
}

impl WeightUnit {
    /// Display symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Grams => "g",
            Self::Kilograms => "kg",
            Self::Ounces => "oz",
            Self::Pounds => "lb",
        }
    }

    /// Grams in one of this unit.
    pub fn grams_per_unit(self) -> f64 {
        match self {
            Self::Grams => 1.0,
            Self::Kilograms => GRAMS_PER_KILOGRAM,
            Self::Ounces => GRAMS_PER_OUNCE,
            Self::Pounds => GRAMS_PER_OUNCE * OUNCES_PER_POUND,
        }
    }

    /// The unit system this unit belongs to.
    pub fn system(self) -> UnitSystem {
        match self {
            Self::Grams | Self::Kilograms => UnitSystem::Metric,
            Self::Ounces | Self::Pounds => UnitSystem::Imperial,
        }
    }

    /// Decimal places kept when a value is displayed in this unit.
    pub fn decimal_places(self) -> u32 {
        match self {
            Self::Ounces => 1,
            Self::Grams | Self::Kilograms | Self::Pounds => 2,
        }
    }

    /// Largest difference, in grams, between a weight and its rounded
    /// display value in this unit.
    pub fn max_rounding_error_grams(self) -> f64 {
        0.5 * 10f64.powi(-(self.decimal_places() as i32)) * self.grams_per_unit()
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A display weight: a rounded value and the unit it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub value: f64,
    pub unit: WeightUnit,
}

impl Weight {
    /// The zero weight in the smallest unit of `system`.
    pub fn zero(system: UnitSystem) -> Self {
        let unit = match system {
            UnitSystem::Metric => WeightUnit::Grams,
            UnitSystem::Imperial => WeightUnit::Ounces,
        };
        Self { value: 0.0, unit }
    }

    /// Convert the display value back to grams.
    pub fn to_grams(self) -> f64 {
        self.value * self.unit.grams_per_unit()
    }

    /// Compact form: gram values rounded to whole grams. A gram value that
    /// rounds up to 1000 is shown as `1 kg`. Other units are returned
    /// unchanged.
    pub fn compact(self) -> Self {
        match self.unit {
            WeightUnit::Grams => {
                let grams = self.value.round();
                if grams >= GRAMS_PER_KILOGRAM {
                    Self {
                        value: round_to(grams / GRAMS_PER_KILOGRAM, 2),
                        unit: WeightUnit::Kilograms,
                    }
                } else {
                    Self {
                        value: grams,
                        unit: self.unit,
                    }
                }
            }
            _ => self,
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Convert a weight in grams into a display [`Weight`] for `system`.
///
/// # Errors
///
/// Returns [`EngineError::NegativeGrams`] for negative input and
/// [`EngineError::NonFiniteGrams`] for NaN or infinite input.
pub fn convert(grams: f64, system: UnitSystem) -> EngineResult<Weight> {
    if !grams.is_finite() {
        return Err(EngineError::NonFiniteGrams { grams });
    }
    if grams < 0.0 {
        return Err(EngineError::NegativeGrams { grams });
    }

    let (small, large, threshold) = match system {
        UnitSystem::Metric => (WeightUnit::Grams, WeightUnit::Kilograms, GRAMS_PER_KILOGRAM),
        UnitSystem::Imperial => (WeightUnit::Ounces, WeightUnit::Pounds, OUNCES_PER_POUND),
    };

    let in_small = round_to(grams / small.grams_per_unit(), small.decimal_places());
    if in_small < threshold {
        return Ok(Weight {
            value: in_small,
            unit: small,
        });
    }

    Ok(Weight {
        value: round_to(grams / large.grams_per_unit(), large.decimal_places()),
        unit: large,
    })
}
