mod app;
mod state;
mod ui;

use app::ExperimentCompareApp;
use eframe::egui;
use experiment_compare::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Experiment Compare",
        options,
        Box::new(|_cc| Ok(Box::new(ExperimentCompareApp::new(config)))),
    )
}
