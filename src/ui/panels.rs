use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::Selection;
use crate::format::{format_count, format_currency};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// One dropdown. Returns the newly picked value, if the user changed it.
fn selection_combo<T>(
    ui: &mut Ui,
    id: &str,
    current: &Selection<T>,
    options: &[T],
) -> Option<Selection<T>>
where
    T: Clone + PartialEq + std::fmt::Display,
{
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(*current == Selection::All, "All")
                .clicked()
            {
                picked = Some(Selection::All);
            }
            for opt in options {
                let is_current = matches!(current, Selection::Only(v) if v == opt);
                if ui.selectable_label(is_current, opt.to_string()).clicked() {
                    picked = Some(Selection::Only(opt.clone()));
                }
            }
        });
    picked
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state afterwards.
    let regions: Vec<String> = dataset.regions.iter().cloned().collect();
    let methods: Vec<String> = dataset.sales_methods.iter().cloned().collect();
    let years: Vec<i32> = dataset.years.iter().copied().collect();

    ui.strong("Select Region");
    if let Some(sel) = selection_combo(ui, "region_filter", &state.filters.region, &regions) {
        state.set_region(sel);
    }
    ui.add_space(6.0);

    ui.strong("Select Sales Method");
    if let Some(sel) = selection_combo(ui, "method_filter", &state.filters.sales_method, &methods) {
        state.set_sales_method(sel);
    }
    ui.add_space(6.0);

    ui.strong("Select Year");
    if let Some(sel) = selection_combo(ui, "year_filter", &state.filters.year, &years) {
        state.set_year(sel);
    }
    ui.add_space(10.0);

    if ui
        .add_enabled(!state.filters.is_unfiltered(), egui::Button::new("Reset filters"))
        .clicked()
    {
        state.reset_filters();
    }
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

fn metric_card(ui: &mut Ui, label: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).color(Color32::GRAY));
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

/// The four metric cards above the charts.
pub fn kpi_row(ui: &mut Ui, state: &AppState) {
    let kpis = &state.dashboard.kpis;
    ui.columns(4, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Total Sales", &format_currency(kpis.total_sales));
        metric_card(&mut cols[1], "Total Profit", &format_currency(kpis.total_profit));
        metric_card(&mut cols[2], "Total Units Sold", &format_count(kpis.total_units));
        metric_card(&mut cols[3], "Top Product", kpis.top_product_label());
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} sales loaded, {} matching filters",
                ds.len(),
                state.dashboard.record_count
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
