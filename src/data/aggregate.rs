use std::collections::BTreeMap;

use super::filter::{FilterState, filtered_view};
use super::model::{SaleRecord, YearMonth};

/// Shown as the top product when no record passes the filters.
pub const NO_TOP_PRODUCT: &str = "N/A";

/// Default length of the top products series.
pub const DEFAULT_TOP_PRODUCTS: usize = 10;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Headline numbers for the metric cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_units: f64,
    /// Product with the most units sold; `None` for an empty view.
    pub top_product: Option<String>,
}

impl Kpis {
    /// Top product name, or [`NO_TOP_PRODUCT`] when there is none.
    pub fn top_product_label(&self) -> &str {
        self.top_product.as_deref().unwrap_or(NO_TOP_PRODUCT)
    }
}

/// One slice of the profit-by-method pie.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodShare {
    pub method: String,
    pub profit: f64,
    /// Share of the summed profit, 0–100.
    pub percentage: f64,
}

/// Everything the presentation layer draws for one filter selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    /// Number of records in the filtered view.
    pub record_count: usize,
    pub kpis: Kpis,
    /// Total sales per month, chronological.
    pub monthly_sales: Vec<(YearMonth, f64)>,
    /// Operating profit per region, by region name.
    pub profit_by_region: Vec<(String, f64)>,
    /// Units sold per product, largest first.
    pub top_products: Vec<(String, f64)>,
    /// Operating profit per sales method, by method name.
    pub profit_by_method: Vec<MethodShare>,
}

// ---------------------------------------------------------------------------
// Pipeline entry points
// ---------------------------------------------------------------------------

/// Filter the full record set and aggregate what is left.
pub fn compute_dashboard(
    records: &[SaleRecord],
    filters: &FilterState,
    top_n: usize,
) -> Dashboard {
    let view = filtered_view(records, filters);
    summarize(&view, top_n)
}

/// Run every aggregation over an already-filtered view.
pub fn summarize(view: &[&SaleRecord], top_n: usize) -> Dashboard {
    let units = units_by_product(view);
    Dashboard {
        record_count: view.len(),
        kpis: Kpis {
            total_sales: view.iter().map(|r| r.total_sales).sum(),
            total_profit: view.iter().map(|r| r.operating_profit).sum(),
            total_units: view.iter().map(|r| r.units_sold).sum(),
            top_product: top_product(&units),
        },
        monthly_sales: monthly_sales(view),
        profit_by_region: profit_by_region(view),
        top_products: top_products(&units, top_n),
        profit_by_method: profit_by_method(view),
    }
}

// ---------------------------------------------------------------------------
// Individual reductions
// ---------------------------------------------------------------------------

/// Sum a measure per key. `BTreeMap` keeps the groups in key order.
fn group_sum<'a, K, F, V>(view: &[&'a SaleRecord], key: F, value: V) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&'a SaleRecord) -> K,
    V: Fn(&SaleRecord) -> f64,
{
    let mut groups = BTreeMap::new();
    for &rec in view {
        *groups.entry(key(rec)).or_insert(0.0) += value(rec);
    }
    groups
}

/// Units sold per product, keyed by product name.
pub fn units_by_product<'a>(view: &[&'a SaleRecord]) -> BTreeMap<&'a str, f64> {
    group_sum(view, |r| r.product.as_str(), |r| r.units_sold)
}

/// Product with the highest summed units. On a tie the alphabetically first
/// name wins.
pub fn top_product(units: &BTreeMap<&str, f64>) -> Option<String> {
    let mut best: Option<(&str, f64)> = None;
    for (&name, &total) in units {
        // Strictly greater, so the earlier (smaller) name keeps a tie.
        if best.map_or(true, |(_, best_total)| total > best_total) {
            best = Some((name, total));
        }
    }
    best.map(|(name, _)| name.to_string())
}

pub fn monthly_sales(view: &[&SaleRecord]) -> Vec<(YearMonth, f64)> {
    group_sum(view, |r| r.year_month(), |r| r.total_sales)
        .into_iter()
        .collect()
}

pub fn profit_by_region(view: &[&SaleRecord]) -> Vec<(String, f64)> {
    group_sum(view, |r| r.region.as_str(), |r| r.operating_profit)
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// The `limit` best-selling products by units, descending. Equal totals are
/// ordered by product name.
pub fn top_products(units: &BTreeMap<&str, f64>, limit: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(&str, f64)> = units.iter().map(|(&k, &v)| (k, v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(limit);
    ranked
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

pub fn profit_by_method(view: &[&SaleRecord]) -> Vec<MethodShare> {
    let groups = group_sum(view, |r| r.sales_method.as_str(), |r| r.operating_profit);
    let total: f64 = groups.values().sum();
    groups
        .into_iter()
        .map(|(method, profit)| MethodShare {
            method: method.to_string(),
            profit,
            percentage: if total == 0.0 {
                0.0
            } else {
                profit / total * 100.0
            },
        })
        .collect()
}
