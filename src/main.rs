mod app;
mod ui;

use app::LaunchDashApp;
use clap::Parser;
use eframe::egui;
use launch_dash::config::DashConfig;
use launch_dash::data::loader;
use launch_dash::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashConfig::parse();
    let mut state = AppState::new(&config);
    state.set_loaded(loader::load(&config.data));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
}
