use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Column names as they appear in the cleaned dataset header
// ---------------------------------------------------------------------------

pub const COL_REGION: &str = "Region";
pub const COL_METHOD: &str = "Sales Method";
pub const COL_YEAR: &str = "Year";
pub const COL_INVOICE_DATE: &str = "Invoice Date";
pub const COL_PRODUCT: &str = "Product";
pub const COL_UNITS: &str = "Units Sold";
pub const COL_SALES: &str = "Total Sales";
pub const COL_PROFIT: &str = "Operating Profit";

// ---------------------------------------------------------------------------
// SaleRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single sale (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub region: String,
    pub sales_method: String,
    pub year: i32,
    pub invoice_date: NaiveDate,
    pub product: String,
    pub units_sold: f64,
    pub total_sales: f64,
    pub operating_profit: f64,
}

impl SaleRecord {
    /// Calendar month the invoice falls in.
    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_date(self.invoice_date)
    }
}

// ---------------------------------------------------------------------------
// YearMonth – month-granularity grouping key
// ---------------------------------------------------------------------------

/// Invoice date truncated to its month.
///
/// Ordering is chronological (year first, then month), which is what the
/// monthly series is sorted by. The display labels are never used for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Short chart label, e.g. `Jan 2020`.
    pub fn label(&self) -> String {
        let idx = self.month.clamp(1, 12) as usize - 1;
        format!("{} {}", MONTH_ABBREV[idx], self.year)
    }
}

/// Sortable key form, e.g. `2020-01`.
impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset plus the filter option lists derived from it.
///
/// Option lists come from the whole dataset, so they stay the same no matter
/// which filters are active.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    pub records: Vec<SaleRecord>,
    pub regions: BTreeSet<String>,
    pub sales_methods: BTreeSet<String>,
    pub years: BTreeSet<i32>,
}

impl SalesDataset {
    /// Build the option indices from the loaded records.
    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        let mut regions = BTreeSet::new();
        let mut sales_methods = BTreeSet::new();
        let mut years = BTreeSet::new();

        for rec in &records {
            regions.insert(rec.region.clone());
            sales_methods.insert(rec.sales_method.clone());
            years.insert(rec.year);
        }

        SalesDataset {
            records,
            regions,
            sales_methods,
            years,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn sale(
    region: &str,
    method: &str,
    date: &str,
    product: &str,
    units: f64,
    sales: f64,
    profit: f64,
) -> SaleRecord {
    let invoice_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    SaleRecord {
        region: region.to_string(),
        sales_method: method.to_string(),
        year: invoice_date.year(),
        invoice_date,
        product: product.to_string(),
        units_sold: units,
        total_sales: sales,
        operating_profit: profit,
    }
}
