//! # Text Rendering
//!
//! Plain-text layout of a [`PackView`] for the terminal: a header, one
//! table per category in pack order, the weight-sorted sidebar, and the
//! pack totals. Each block is a [`fmt::Display`] wrapper; the `render_*`
//! functions collect them into strings.

use std::fmt;

use packstack_core::{CategoryStat, CategoryView, PackTotals, PackView, Weight};

const NAME_WIDTH: usize = 28;
const NUM_WIDTH: usize = 10;

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let kept: String = name.chars().take(width.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

fn flags(worn: bool, consumable: bool) -> &'static str {
    match (worn, consumable) {
        (true, true) => "worn, consumable",
        (true, false) => "worn",
        (false, true) => "consumable",
        (false, false) => "",
    }
}

/// One category table: item rows, then the total and worn lines.
struct CategoryTable<'a>(&'a CategoryView);

impl fmt::Display for CategoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = self.0;
        let marker = if category.consumable { " (consumable)" } else { "" };
        writeln!(f, "{}{marker}", category.name)?;
        writeln!(
            f,
            "  {:<NAME_WIDTH$} {:>5} {:>NUM_WIDTH$} {:>NUM_WIDTH$}  {}",
            "Item", "Qty", "Weight", "Total", "Flags"
        )?;
        for item in &category.items {
            writeln!(
                f,
                "  {:<NAME_WIDTH$} {:>5} {:>NUM_WIDTH$} {:>NUM_WIDTH$}  {}",
                truncate(&item.name, NAME_WIDTH),
                item.quantity,
                item.weight.to_string(),
                item.total.to_string(),
                flags(item.worn, item.consumable),
            )?;
        }
        for (label, weight) in [("Total", category.total()), ("Worn", category.worn())] {
            writeln!(
                f,
                "  {label:<NAME_WIDTH$} {:>5} {:>NUM_WIDTH$} {:>NUM_WIDTH$}",
                "",
                "",
                weight.to_string()
            )?;
        }
        Ok(())
    }
}

/// The sidebar: one line per category, in the order given.
struct StatsTable<'a>(&'a [CategoryStat]);

impl fmt::Display for StatsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<NAME_WIDTH$} {:>NUM_WIDTH$} {:>NUM_WIDTH$}",
            "Category", "Total", "Worn"
        )?;
        for stat in self.0 {
            let total = Weight {
                value: stat.total_weight,
                unit: stat.total_unit,
            };
            let worn = Weight {
                value: stat.worn_weight,
                unit: stat.worn_unit,
            };
            let marker = if stat.consumable { " *" } else { "" };
            writeln!(
                f,
                "{:<NAME_WIDTH$} {:>NUM_WIDTH$} {:>NUM_WIDTH$}{marker}",
                truncate(&stat.name, NAME_WIDTH),
                total.to_string(),
                worn.to_string(),
            )?;
        }
        Ok(())
    }
}

/// Base / worn / consumable / total lines plus the item count.
struct TotalsBlock<'a>(&'a PackTotals);

impl fmt::Display for TotalsBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let totals = self.0;
        for (label, weight) in [
            ("Base weight", totals.base),
            ("Worn", totals.worn),
            ("Consumable", totals.consumable),
            ("Total", totals.total),
        ] {
            writeln!(f, "{label:<NAME_WIDTH$} {:>NUM_WIDTH$}", weight.to_string())?;
        }
        writeln!(f, "{:<NAME_WIDTH$} {:>NUM_WIDTH$}", "Items", totals.item_count)
    }
}

/// The whole page.
struct Page<'a>(&'a PackView);

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(f, "{}", view.title)?;
        if let Some(description) = view.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(f, "{description}")?;
        }
        writeln!(f)?;
        let compact = if view.compact { ", compact" } else { "" };
        writeln!(f, "Packing List ({}{compact})", view.unit_system)?;
        writeln!(f)?;

        for category in &view.categories {
            writeln!(f, "{}", CategoryTable(category))?;
        }

        writeln!(f, "Categories by weight")?;
        writeln!(f, "{}", StatsTable(&view.stats))?;
        write!(f, "{}", TotalsBlock(&view.totals))
    }
}

/// Render the sidebar stats, one line per category.
pub fn render_stats(stats: &[CategoryStat]) -> String {
    StatsTable(stats).to_string()
}

/// Render the pack totals block.
pub fn render_totals(totals: &PackTotals) -> String {
    TotalsBlock(totals).to_string()
}

/// Render the whole page.
pub fn render_view(view: &PackView) -> String {
    Page(view).to_string()
}
