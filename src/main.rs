mod app;
mod color;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::PenguinDashApp;
use eframe::egui;
use penguin_dash::config::DashboardConfig;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env().context("loading configuration")?;
    log::info!("Starting '{}'", config.title);

    // The dataset is loaded exactly once; without it there is nothing to show.
    let source = config.dataset_source();
    let dataset = source.load().map_err(|e| {
        log::error!("Cannot load penguin data from {}: {e}", source.describe());
        e
    })?;
    let state = AppState::new(dataset, config.clone(), source.describe());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(|_cc| Ok(Box::new(PenguinDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("eframe: {e}"))
}
