mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::PassDashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::{AppState, SeasonData};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load()?;
    let path = config.season_file()?;
    let data = SeasonData::load(&path, config.min_plays_per_passer)
        .with_context(|| format!("preparing season {}", config.season))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(config, Some(data));
    eframe::run_native(
        "Pass Play Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(PassDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
