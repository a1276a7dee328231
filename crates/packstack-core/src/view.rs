//! # Pack View Page Model
//!
//! Everything a renderer needs for one shared pack page, built from
//! `(pack data, unit system, compact flag)` in a single pure call.

use serde::Serialize;

use crate::aggregate::{aggregate, pack_totals, summarize, CategoryStat, CategoryView, PackTotals};
use crate::error::EngineResult;
use crate::identity::PackId;
use crate::model::PackData;
use crate::units::UnitSystem;

/// Descriptions longer than this are truncated for the meta tag.
const META_DESCRIPTION_MAX: usize = 160;

/// Characters kept before the ellipsis when truncating.
const META_DESCRIPTION_KEEP: usize = 157;

/// Derived page model for a shared pack.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackView {
    pub id: PackId,
    pub title: String,
    pub description: Option<String>,
    pub page_title: String,
    pub meta_description: String,
    pub unit_system: UnitSystem,
    pub compact: bool,
    /// Main table, in pack order.
    pub categories: Vec<CategoryView>,
    /// Sidebar, heaviest category first.
    pub stats: Vec<CategoryStat>,
    pub totals: PackTotals,
}

impl PackView {
    /// Build the page model.
    ///
    /// With `compact` set, gram values in the category tables are rounded to
    /// whole grams. The sidebar stats are projected from the rounded views.
    pub fn build(data: &PackData, system: UnitSystem, compact: bool) -> EngineResult<Self> {
        let mut categories = aggregate(&data.categories, system)?;
        if compact {
            categories = categories.into_iter().map(CategoryView::compact).collect();
        }
        let stats = summarize(&categories);
        let totals = pack_totals(&data.categories, system)?;

        Ok(Self {
            id: data.pack.id.clone(),
            title: data.pack.title.clone(),
            description: data.pack.description.clone(),
            page_title: page_title(&data.pack.title),
            meta_description: meta_description(&data.pack.title, data.pack.description.as_deref()),
            unit_system: system,
            compact,
            categories,
            stats,
            totals,
        })
    }
}

/// `<title>` text for a pack page.
pub fn page_title(title: &str) -> String {
    format!("{title} - packing list | Packstack")
}

/// Meta description: the pack description, truncated to 157 characters plus
/// `...` when longer than 160, or a generic line when there is none.
pub fn meta_description(title: &str, description: Option<&str>) -> String {
    match description {
        Some(d) if !d.is_empty() => {
            if d.chars().count() > META_DESCRIPTION_MAX {
                let kept: String = d.chars().take(META_DESCRIPTION_KEEP).collect();
                format!("{kept}...")
            } else {
                d.to_string()
            }
        }
        _ => format!("Packing list for {title}"),
    }
}
