use std::path::Path;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::aggregate::{Dashboard, compute_dashboard};
use crate::data::filter::{FilterState, Selection};
use crate::data::loader::load_file;
use crate::data::model::SalesDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<SalesDataset>,

    /// Current sidebar selections.
    pub filters: FilterState,

    /// Aggregates for the current selections; rebuilt on every change.
    pub dashboard: Dashboard,

    /// Stable colours per region, from the full dataset.
    pub region_colors: ColorMap,

    /// Stable colours per sales method, from the full dataset.
    pub method_colors: ColorMap,

    /// Length of the top products series.
    pub top_products_limit: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            dataset: None,
            filters: FilterState::default(),
            dashboard: Dashboard::default(),
            region_colors: ColorMap::default(),
            method_colors: ColorMap::default(),
            top_products_limit: config.top_products_limit,
            status_message: None,
        }
    }

    /// Load a file and make it the active dataset. On failure the previous
    /// dataset stays and the error is shown in the status line.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error loading {}: {e}", path.display()));
            }
        }
    }

    /// Ingest a newly loaded dataset, keep still-valid selections and recompute.
    pub fn set_dataset(&mut self, dataset: SalesDataset) {
        self.filters.retain_valid(&dataset);
        self.region_colors = ColorMap::new(&dataset.regions);
        self.method_colors = ColorMap::new(&dataset.sales_methods);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute the dashboard from the full dataset and current filters.
    pub fn refresh(&mut self) {
        self.dashboard = match &self.dataset {
            Some(ds) => compute_dashboard(&ds.records, &self.filters, self.top_products_limit),
            None => Dashboard::default(),
        };
        log::debug!(
            "filters {}/{}/{} → {} records",
            self.filters.region,
            self.filters.sales_method,
            self.filters.year,
            self.dashboard.record_count
        );
    }

    pub fn set_region(&mut self, region: Selection<String>) {
        if self.filters.region != region {
            self.filters.region = region;
            self.refresh();
        }
    }

    pub fn set_sales_method(&mut self, method: Selection<String>) {
        if self.filters.sales_method != method {
            self.filters.sales_method = method;
            self.refresh();
        }
    }

    pub fn set_year(&mut self, year: Selection<i32>) {
        if self.filters.year != year {
            self.filters.year = year;
            self.refresh();
        }
    }

    /// Back to "All" for every filter.
    pub fn reset_filters(&mut self) {
        if !self.filters.is_unfiltered() {
            self.filters = FilterState::default();
            self.refresh();
        }
    }
}
