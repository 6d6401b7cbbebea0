//! egui widgets: filter sidebar, KPI cards and the four charts.

pub mod charts;
pub mod panels;
