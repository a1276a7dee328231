//! # Category Aggregation
//!
//! Turns the canonical category/item structure into display-ready
//! statistics for one [`UnitSystem`]:
//!
//! - [`aggregate`]: one [`CategoryView`] per category, in input order,
//!   with converted item weights and category totals.
//! - [`summarize`]: the sidebar projection: one [`CategoryStat`] per
//!   category, sorted by total weight descending (stable).
//! - [`pack_totals`]: base / worn / consumable / total for the whole pack.
//!
//! Every function is pure and recomputes from scratch. Input is validated
//! before anything is summed; the first malformed item aborts the call.

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::identity::{CategoryId, ItemId};
use crate::model::{Category, Item};
use crate::units::{convert, UnitSystem, Weight, WeightUnit};

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// One item row of a category table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub quantity: u64,
    pub worn: bool,
    pub consumable: bool,
    /// Unit weight.
    pub weight: Weight,
    /// `weight * quantity`, converted on its own magnitude.
    pub total: Weight,
}

/// Per-category totals plus the category's item rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: CategoryId,
    pub name: String,
    /// True when at least one item is consumable. A display hint only.
    pub consumable: bool,
    pub worn_weight: f64,
    pub worn_unit: WeightUnit,
    pub total_weight: f64,
    pub total_unit: WeightUnit,
    pub worn_grams: f64,
    pub total_grams: f64,
    pub items: Vec<ItemView>,
}

impl CategoryView {
    /// Category total as a display weight.
    pub fn total(&self) -> Weight {
        Weight {
            value: self.total_weight,
            unit: self.total_unit,
        }
    }

    /// Worn weight as a display weight.
    pub fn worn(&self) -> Weight {
        Weight {
            value: self.worn_weight,
            unit: self.worn_unit,
        }
    }

    /// Compact form of this view: gram values rounded to whole grams.
    pub fn compact(mut self) -> Self {
        let total = self.total().compact();
        let worn = self.worn().compact();
        self.total_weight = total.value;
        self.total_unit = total.unit;
        self.worn_weight = worn.value;
        self.worn_unit = worn.unit;
        for item in &mut self.items {
            item.weight = item.weight.compact();
            item.total = item.total.compact();
        }
        self
    }
}

/// Sidebar entry for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub id: CategoryId,
    pub name: String,
    pub consumable: bool,
    pub worn_weight: f64,
    pub worn_unit: WeightUnit,
    pub total_weight: f64,
    pub total_unit: WeightUnit,
    pub total_grams: f64,
    /// Position of the category in input order. Renderers index their
    /// colour palette with it so colours survive the weight sort.
    pub color_index: usize,
}

/// Pack-level weight split.
///
/// `base` counts items flagged neither worn nor consumable. An item flagged
/// both worn and consumable counts toward both `worn` and `consumable`, so
/// the three parts only add up to `total` when no item carries both flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackTotals {
    pub base: Weight,
    pub worn: Weight,
    pub consumable: Weight,
    pub total: Weight,
    pub base_grams: f64,
    pub worn_grams: f64,
    pub consumable_grams: f64,
    pub total_grams: f64,
    pub item_count: u64,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check one item; returns its quantity as unsigned and its line weight
/// (`weight * quantity`) in grams.
fn validate_item(category: &Category, item: &Item) -> EngineResult<(u64, f64)> {
    if !item.weight.is_finite() {
        return Err(EngineError::NonFiniteWeight {
            category: category.id.clone(),
            item: item.id.clone(),
            weight: item.weight,
        });
    }
    if item.weight < 0.0 {
        return Err(EngineError::NegativeWeight {
            category: category.id.clone(),
            item: item.id.clone(),
            weight: item.weight,
        });
    }
    let quantity = u64::try_from(item.quantity).map_err(|_| EngineError::NegativeQuantity {
        category: category.id.clone(),
        item: item.id.clone(),
        quantity: item.quantity,
    })?;
    let line_grams = item.weight * quantity as f64;
    if !line_grams.is_finite() {
        return Err(overflow(category, item));
    }
    Ok((quantity, line_grams))
}

fn overflow(category: &Category, item: &Item) -> EngineError {
    EngineError::WeightOverflow {
        category: category.id.clone(),
        item: item.id.clone(),
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

fn aggregate_category(category: &Category, system: UnitSystem) -> EngineResult<CategoryView> {
    let mut total_grams = 0.0;
    let mut worn_grams = 0.0;
    let mut consumable = false;
    let mut items = Vec::with_capacity(category.items.len());

    for item in &category.items {
        let (quantity, line_grams) = validate_item(category, item)?;

        total_grams += line_grams;
        if !total_grams.is_finite() {
            return Err(overflow(category, item));
        }
        if item.worn {
            worn_grams += line_grams;
        }
        consumable |= item.consumable;

        items.push(ItemView {
            id: item.id.clone(),
            name: item.name.clone(),
            quantity,
            worn: item.worn,
            consumable: item.consumable,
            weight: convert(item.weight, system)?,
            total: convert(line_grams, system)?,
        });
    }

    let total = convert(total_grams, system)?;
    let worn = convert(worn_grams, system)?;

    Ok(CategoryView {
        id: category.id.clone(),
        name: category.name.clone(),
        consumable,
        worn_weight: worn.value,
        worn_unit: worn.unit,
        total_weight: total.value,
        total_unit: total.unit,
        worn_grams,
        total_grams,
        items,
    })
}

/// Build one [`CategoryView`] per category, preserving input order.
///
/// # Errors
///
/// The first item with a negative or non-finite weight, or a negative
/// quantity, aborts aggregation with an [`EngineError`] naming it.
pub fn aggregate(categories: &[Category], system: UnitSystem) -> EngineResult<Vec<CategoryView>> {
    categories
        .iter()
        .map(|category| aggregate_category(category, system))
        .collect()
}

/// Project category views into sidebar stats sorted by total weight,
/// heaviest first.
///
/// Ordering compares the underlying gram totals, since display values in
/// different units are not comparable. The sort is stable: categories of
/// equal weight keep their input order. `views` is not modified.
pub fn summarize(views: &[CategoryView]) -> Vec<CategoryStat> {
    let mut stats: Vec<CategoryStat> = views
        .iter()
        .enumerate()
        .map(|(index, view)| CategoryStat {
            id: view.id.clone(),
            name: view.name.clone(),
            consumable: view.consumable,
            worn_weight: view.worn_weight,
            worn_unit: view.worn_unit,
            total_weight: view.total_weight,
            total_unit: view.total_unit,
            total_grams: view.total_grams,
            color_index: index,
        })
        .collect();
    stats.sort_by(|a, b| b.total_grams.total_cmp(&a.total_grams));
    stats
}

/// Compute the pack-level base / worn / consumable / total split.
///
/// # Errors
///
/// Same validation as [`aggregate`].
pub fn pack_totals(categories: &[Category], system: UnitSystem) -> EngineResult<PackTotals> {
    let mut base_grams = 0.0;
    let mut worn_grams = 0.0;
    let mut consumable_grams = 0.0;
    let mut total_grams = 0.0;
    let mut item_count = 0u64;

    for category in categories {
        for item in &category.items {
            let (quantity, line_grams) = validate_item(category, item)?;

            total_grams += line_grams;
            if !total_grams.is_finite() {
                return Err(overflow(category, item));
            }
            item_count = item_count.saturating_add(quantity);
            if item.worn {
                worn_grams += line_grams;
            }
            if item.consumable {
                consumable_grams += line_grams;
            }
            if !item.worn && !item.consumable {
                base_grams += line_grams;
            }
        }
    }

    Ok(PackTotals {
        base: convert(base_grams, system)?,
        worn: convert(worn_grams, system)?,
        consumable: convert(consumable_grams, system)?,
        total: convert(total_grams, system)?,
        base_grams,
        worn_grams,
        consumable_grams,
        total_grams,
        item_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, weight: f64, quantity: i64, worn: bool, consumable: bool) -> Item {
        Item {
            id: ItemId::from(id),
            name: format!("item {id}"),
            quantity,
            weight,
            worn,
            consumable,
        }
    }

    fn category(id: &str, items: Vec<Item>) -> Category {
        Category {
            id: CategoryId::from(id),
            name: format!("category {id}"),
            items,
        }
    }

    fn clothing() -> Category {
        category(
            "clothing",
            vec![
                item("jacket", 500.0, 2, true, false),
                item("fleece", 1200.0, 1, false, false),
            ],
        )
    }

    #[test]
    fn metric_example_splits_total_and_worn_units() {
        let views = aggregate(&[clothing()], UnitSystem::Metric).unwrap();
        let v = &views[0];
        assert_eq!(v.total_grams, 2200.0);
        assert_eq!(v.total_weight, 2.2);
        assert_eq!(v.total_unit, WeightUnit::Kilograms);
        assert_eq!(v.worn_grams, 1000.0);
        assert_eq!(v.worn_weight, 1.0);
        assert_eq!(v.worn_unit, WeightUnit::Kilograms);
        assert!(!v.consumable);
    }

    #[test]
    fn worn_weight_converted_independently_of_total() {
        let cat = category(
            "mixed",
            vec![
                item("hat", 80.0, 1, true, false),
                item("pack", 1400.0, 1, false, false),
            ],
        );
        let v = &aggregate(&[cat], UnitSystem::Metric).unwrap()[0];
        assert_eq!(v.total_unit, WeightUnit::Kilograms);
        assert_eq!(v.worn_unit, WeightUnit::Grams);
        assert_eq!(v.worn_weight, 80.0);
    }

    #[test]
    fn imperial_example_reports_pounds() {
        let v = &aggregate(&[clothing()], UnitSystem::Imperial).unwrap()[0];
        assert_eq!(v.total_unit, WeightUnit::Pounds);
        assert_eq!(v.total_weight, 4.85);
    }

    #[test]
    fn empty_category_yields_zero() {
        let v = &aggregate(&[category("empty", vec![])], UnitSystem::Metric).unwrap()[0];
        assert_eq!(v.total_weight, 0.0);
        assert_eq!(v.worn_weight, 0.0);
        assert_eq!(v.total_unit, WeightUnit::Grams);
        assert!(!v.consumable);
        assert!(v.items.is_empty());
    }

    #[test]
    fn zero_quantity_contributes_nothing() {
        let cat = category(
            "food",
            vec![
                item("bar", 60.0, 0, false, true),
                item("gel", 30.0, 2, false, false),
            ],
        );
        let v = &aggregate(&[cat], UnitSystem::Metric).unwrap()[0];
        assert_eq!(v.total_grams, 60.0);
        assert!(v.consumable, "flag comes from the item, not its weight");
        assert_eq!(v.items[0].total.value, 0.0);
    }

    #[test]
    fn item_rows_keep_order_and_convert_each_weight() {
        let v = &aggregate(&[clothing()], UnitSystem::Metric).unwrap()[0];
        let names: Vec<_> = v.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(names, ["jacket", "fleece"]);
        assert_eq!(v.items[0].weight.value, 500.0);
        assert_eq!(v.items[0].total.unit, WeightUnit::Kilograms);
        assert_eq!(v.items[1].weight.unit, WeightUnit::Kilograms);
    }

    #[test]
    fn negative_weight_names_the_item() {
        let cats = vec![
            clothing(),
            category("bad", vec![item("ghost", -3.0, 1, false, false)]),
        ];
        let err = aggregate(&cats, UnitSystem::Metric).unwrap_err();
        assert_eq!(
            err,
            EngineError::NegativeWeight {
                category: CategoryId::from("bad"),
                item: ItemId::from("ghost"),
                weight: -3.0,
            }
        );
    }

    #[test]
    fn negative_quantity_rejected() {
        let cats = vec![category("c", vec![item("i", 10.0, -2, false, false)])];
        assert!(matches!(
            aggregate(&cats, UnitSystem::Imperial),
            Err(EngineError::NegativeQuantity { quantity: -2, .. })
        ));
        assert!(pack_totals(&cats, UnitSystem::Imperial).is_err());
    }

    #[test]
    fn nan_weight_rejected() {
        let cats = vec![category("c", vec![item("i", f64::NAN, 1, false, false)])];
        assert!(matches!(
            aggregate(&cats, UnitSystem::Metric),
            Err(EngineError::NonFiniteWeight { .. })
        ));
    }

    #[test]
    fn summarize_sorts_by_grams_not_display_value() {
        // 2.2 kg must outrank 500 g even though 500 > 2.2.
        let cats = vec![
            category("light", vec![item("a", 500.0, 1, false, false)]),
            clothing(),
        ];
        let views = aggregate(&cats, UnitSystem::Metric).unwrap();
        let stats = summarize(&views);
        assert_eq!(stats[0].id.as_str(), "clothing");
        assert_eq!(stats[0].color_index, 1);
        assert_eq!(stats[1].id.as_str(), "light");
        assert_eq!(stats[1].color_index, 0);
        // The primary sequence is untouched.
        assert_eq!(views[0].id.as_str(), "light");
    }

    #[test]
    fn summarize_keeps_input_order_on_ties() {
        let cats = vec![
            category("first", vec![item("a", 100.0, 1, false, false)]),
            category("heavy", vec![item("b", 900.0, 1, false, false)]),
            category("second", vec![item("c", 50.0, 2, false, false)]),
        ];
        let stats = summarize(&aggregate(&cats, UnitSystem::Metric).unwrap());
        let ids: Vec<_> = stats.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["heavy", "first", "second"]);
    }

    #[test]
    fn pack_totals_split() {
        let cats = vec![
            clothing(),
            category(
                "food",
                vec![
                    item("dinner", 150.0, 3, false, true),
                    item("snack", 100.0, 1, true, true),
                ],
            ),
        ];
        let t = pack_totals(&cats, UnitSystem::Metric).unwrap();
        assert_eq!(t.total_grams, 2750.0);
        assert_eq!(t.worn_grams, 1100.0);
        assert_eq!(t.consumable_grams, 550.0);
        assert_eq!(t.base_grams, 1200.0);
        assert_eq!(t.item_count, 7);
        assert_eq!(t.total.unit, WeightUnit::Kilograms);
        assert_eq!(t.total.value, 2.75);
        assert_eq!(t.consumable.unit, WeightUnit::Grams);
    }

    #[test]
    fn compact_view_rounds_gram_values() {
        let cat = category("c", vec![item("i", 12.34, 3, true, false)]);
        let v = aggregate(&[cat], UnitSystem::Metric).unwrap().remove(0).compact();
        assert_eq!(v.total_weight, 37.0);
        assert_eq!(v.worn_weight, 37.0);
        assert_eq!(v.items[0].weight.value, 12.0);
        // Raw grams are untouched.
        assert!((v.total_grams - 37.02).abs() < 1e-9);
    }

    #[test]
    fn line_weight_overflow_names_the_item() {
        let cats = vec![category("heavy", vec![item("anvil", 1e308, 10, false, false)])];
        let expected = EngineError::WeightOverflow {
            category: CategoryId::from("heavy"),
            item: ItemId::from("anvil"),
        };
        assert_eq!(aggregate(&cats, UnitSystem::Metric).unwrap_err(), expected);
        assert_eq!(pack_totals(&cats, UnitSystem::Imperial).unwrap_err(), expected);
    }

    #[test]
    fn running_total_overflow_names_the_item_that_tipped_it() {
        let cats = vec![category(
            "heavy",
            vec![
                item("first", 1e308, 1, false, false),
                item("second", 1e308, 1, true, false),
            ],
        )];
        let expected = EngineError::WeightOverflow {
            category: CategoryId::from("heavy"),
            item: ItemId::from("second"),
        };
        assert_eq!(aggregate(&cats, UnitSystem::Metric).unwrap_err(), expected);
        assert_eq!(pack_totals(&cats, UnitSystem::Metric).unwrap_err(), expected);
    }

    #[test]
    fn compact_view_switches_to_kilograms_when_grams_round_up() {
        let cat = category("c", vec![item("i", 999.6, 1, true, false)]);
        let v = aggregate(&[cat], UnitSystem::Metric).unwrap().remove(0).compact();
        assert_eq!(v.total(), Weight { value: 1.0, unit: WeightUnit::Kilograms });
        assert_eq!(v.worn(), Weight { value: 1.0, unit: WeightUnit::Kilograms });
        assert_eq!(v.items[0].total.unit, WeightUnit::Kilograms);
    }

    #[test]
    fn category_view_serializes_camel_case() {
        let v = &aggregate(&[clothing()], UnitSystem::Metric).unwrap()[0];
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["totalWeight"], 2.2);
        assert_eq!(json["totalUnit"], "kg");
        assert_eq!(json["wornWeight"], 1.0);
        assert_eq!(json["consumable"], false);
        assert_eq!(json["items"][0]["total"]["unit"], "kg");
    }
}
