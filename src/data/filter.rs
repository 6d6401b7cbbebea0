use std::fmt;

use super::model::{SaleRecord, SalesDataset};

// ---------------------------------------------------------------------------
// Selection: one dropdown's value
// ---------------------------------------------------------------------------

/// Either the "All" sentinel (no constraint) or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "All"),
            Selection::Only(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterState: the three sidebar selections
// ---------------------------------------------------------------------------

/// The current filter tuple. `Default` selects everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub region: Selection<String>,
    pub sales_method: Selection<String>,
    pub year: Selection<i32>,
}

impl FilterState {
    /// Reset any selection the dataset has no option for back to `All`.
    pub fn retain_valid(&mut self, dataset: &SalesDataset) {
        if let Selection::Only(r) = &self.region {
            if !dataset.regions.contains(r) {
                self.region = Selection::All;
            }
        }
        if let Selection::Only(m) = &self.sales_method {
            if !dataset.sales_methods.contains(m) {
                self.sales_method = Selection::All;
            }
        }
        if let Selection::Only(y) = &self.year {
            if !dataset.years.contains(y) {
                self.year = Selection::All;
            }
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        *self == FilterState::default()
    }
}

// ---------------------------------------------------------------------------
// Single-column predicates
// ---------------------------------------------------------------------------

/// One equality predicate. The filter engine is just these applied in turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Region(String),
    SalesMethod(String),
    Year(i32),
}

impl Predicate {
    pub fn matches(&self, record: &SaleRecord) -> bool {
        match self {
            Predicate::Region(r) => record.region == *r,
            Predicate::SalesMethod(m) => record.sales_method == *m,
            Predicate::Year(y) => record.year == *y,
        }
    }
}

impl From<&FilterState> for Vec<Predicate> {
    fn from(filters: &FilterState) -> Self {
        let mut preds = Vec::with_capacity(3);
        if let Selection::Only(r) = &filters.region {
            preds.push(Predicate::Region(r.clone()));
        }
        if let Selection::Only(m) = &filters.sales_method {
            preds.push(Predicate::SalesMethod(m.clone()));
        }
        if let Selection::Only(y) = filters.year {
            preds.push(Predicate::Year(y));
        }
        preds
    }
}

/// Narrow a view by one predicate, keeping the original row order.
pub fn narrow<'a>(view: Vec<&'a SaleRecord>, predicate: &Predicate) -> Vec<&'a SaleRecord> {
    view.into_iter().filter(|r| predicate.matches(r)).collect()
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Borrowed view over the records that pass all active filters.
///
/// Each concrete selection narrows the view in turn; "All" adds no predicate.
pub fn filtered_view<'a>(records: &'a [SaleRecord], filters: &FilterState) -> Vec<&'a SaleRecord> {
    let predicates: Vec<Predicate> = filters.into();
    predicates
        .iter()
        .fold(records.iter().collect(), |view, p| narrow(view, p))
}
