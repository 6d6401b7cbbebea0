mod app;
mod color;
mod config;
mod data;
mod error;
mod format;
mod state;
mod ui;

use anyhow::Context;
use app::SalesDashboardApp;
use clap::Parser;
use config::{CliArgs, DashboardConfig};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = CliArgs::parse();
    let config = DashboardConfig::from_env(cli).context("loading dashboard settings")?;
    // A dataset that cannot be read at startup is fatal.
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(SalesDashboardApp::new(&config, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
