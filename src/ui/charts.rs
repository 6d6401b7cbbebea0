use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints, Points};

use crate::color::{chart_palette, line_color};
use crate::data::aggregate::MethodShare;
use crate::format::{format_count, format_currency, format_percent};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Central panel layout
// ---------------------------------------------------------------------------

/// Render the four charts in two rows.
pub fn dashboard_charts(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a sales file to get started  (File → Open…)");
        });
        return;
    }

    ui.heading("Overview Charts");
    ui.columns(2, |cols: &mut [Ui]| {
        chart_title(&mut cols[0], "Monthly Sales (by Year & Month)");
        monthly_sales_chart(&mut cols[0], state);
        chart_title(&mut cols[1], "Profit by Region");
        profit_by_region_chart(&mut cols[1], state);
    });

    ui.add_space(12.0);
    ui.heading("Detailed Charts");
    ui.columns(2, |cols: &mut [Ui]| {
        chart_title(&mut cols[0], "Top Products by Units Sold");
        top_products_chart(&mut cols[0], state);
        chart_title(&mut cols[1], "Profit by Sales Method");
        profit_by_method_chart(&mut cols[1], state);
    });
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong().size(16.0));
}

fn empty_chart(ui: &mut Ui) {
    ui.allocate_ui(Vec2::new(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("No sales match the selected filters").color(Color32::GRAY));
        });
    });
}

/// Axis formatter that shows `labels[i]` at integer positions only.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let v = mark.value;
        if v.fract() != 0.0 || v < 0.0 {
            return String::new();
        }
        labels.get(v as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Monthly sales – line chart
// ---------------------------------------------------------------------------

fn monthly_sales_chart(ui: &mut Ui, state: &AppState) {
    let series = &state.dashboard.monthly_sales;
    if series.is_empty() {
        empty_chart(ui);
        return;
    }

    // Months are plotted at 0, 1, 2, … in chronological order.
    let points: Vec<[f64; 2]> = series
        .iter()
        .enumerate()
        .map(|(i, (_, sales))| [i as f64, *sales])
        .collect();
    let labels: Vec<String> = series.iter().map(|(ym, _)| ym.label()).collect();

    Plot::new("monthly_sales")
        .height(CHART_HEIGHT)
        .x_axis_label("Month-Year")
        .y_axis_label("Total Sales ($)")
        .x_axis_formatter(category_axis(labels.clone()))
        .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            format_currency(mark.value)
        })
        .label_formatter(move |_name, value| {
            let idx = value.x.round().max(0.0) as usize;
            match labels.get(idx) {
                Some(label) => format!("{label}\n{}", format_currency(value.y)),
                None => String::new(),
            }
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Total Sales")
                    .color(line_color())
                    .width(4.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .color(line_color())
                    .radius(5.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Profit by region – vertical bars
// ---------------------------------------------------------------------------

fn profit_by_region_chart(ui: &mut Ui, state: &AppState) {
    let series = &state.dashboard.profit_by_region;
    if series.is_empty() {
        empty_chart(ui);
        return;
    }

    let bars: Vec<Bar> = series
        .iter()
        .enumerate()
        .map(|(i, (region, profit))| {
            Bar::new(i as f64, *profit)
                .name(region)
                .fill(state.region_colors.color_for(region))
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = series.iter().map(|(region, _)| region.clone()).collect();

    Plot::new("profit_by_region")
        .height(CHART_HEIGHT)
        .x_axis_label("Region")
        .y_axis_label("Profit ($)")
        .x_axis_formatter(category_axis(labels))
        .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            format_currency(mark.value)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Operating Profit")
                    .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
                        format!("{}\n{}", bar.name, format_currency(bar.value))
                    })),
            );
        });
}

// ---------------------------------------------------------------------------
// Top products – horizontal bars, best seller on top
// ---------------------------------------------------------------------------

fn top_products_chart(ui: &mut Ui, state: &AppState) {
    let series = &state.dashboard.top_products;
    if series.is_empty() {
        empty_chart(ui);
        return;
    }

    let palette = chart_palette();
    let n = series.len();
    // Rank 0 sits at the top, so it gets the highest y position.
    let bars: Vec<Bar> = series
        .iter()
        .enumerate()
        .map(|(rank, (product, units))| {
            Bar::new((n - 1 - rank) as f64, *units)
                .name(product)
                .fill(palette[rank % palette.len()])
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = series.iter().rev().map(|(p, _)| p.clone()).collect();

    Plot::new("top_products")
        .height(CHART_HEIGHT)
        .x_axis_label("Units Sold")
        .y_axis_formatter(category_axis(labels))
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            format_count(mark.value)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .horizontal()
                    .name("Units Sold")
                    .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
                        format!("{}\n{} units", bar.name, format_count(bar.value))
                    })),
            );
        });
}

// ---------------------------------------------------------------------------
// Profit by sales method – pie chart
// ---------------------------------------------------------------------------

/// Angular span of each slice in radians. Non-positive profits get no slice.
pub fn slice_angles(shares: &[MethodShare]) -> Vec<f32> {
    let positive: f64 = shares.iter().map(|s| s.profit.max(0.0)).sum();
    if positive <= 0.0 {
        return vec![0.0; shares.len()];
    }
    shares
        .iter()
        .map(|s| (s.profit.max(0.0) / positive) as f32 * TAU)
        .collect()
}

fn profit_by_method_chart(ui: &mut Ui, state: &AppState) {
    let shares = &state.dashboard.profit_by_method;
    let angles = slice_angles(shares);
    if angles.iter().all(|a| *a <= 0.0) {
        empty_chart(ui);
        return;
    }

    let side = ui.available_width().min(CHART_HEIGHT - 40.0);
    let (rect, _response) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = side * 0.45;
    // Angles run counter-clockwise from the x axis; screen y points down.
    let at = |angle: f32, r: f32| -> Pos2 { center + r * Vec2::new(angle.cos(), -angle.sin()) };

    // First slice starts at 12 o'clock.
    let mut start = FRAC_PI_2;
    for (share, &sweep) in shares.iter().zip(&angles) {
        if sweep <= 0.0 {
            continue;
        }
        let color = state.method_colors.color_for(&share.method);
        let steps = ((sweep / TAU) * 96.0).ceil().max(2.0) as usize;
        for k in 0..steps {
            let a0 = start + sweep * k as f32 / steps as f32;
            let a1 = start + sweep * (k + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![center, at(a0, radius), at(a1, radius)],
                color,
                Stroke::NONE,
            ));
        }

        painter.text(
            at(start + sweep / 2.0, radius * 0.6),
            Align2::CENTER_CENTER,
            format_percent(share.percentage),
            FontId::proportional(13.0),
            Color32::WHITE,
        );
        start += sweep;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for share in shares {
            let color = state.method_colors.color_for(&share.method);
            ui.label(RichText::new("■").color(color));
            ui.label(format!("{} ({})", share.method, format_currency(share.profit)));
            ui.add_space(8.0);
        }
    });
}
