use eframe::egui;

use experiment_compare::config::DashboardConfig;

use crate::state::{AppState, ViewMode};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExperimentCompareApp {
    pub state: AppState,
}

impl ExperimentCompareApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for ExperimentCompareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: experiment list ----
        egui::SidePanel::left("experiment_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        panels::edit_window(ctx, &mut self.state);

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            ViewMode::Single => plot::single_plot(ui, &mut self.state),
            ViewMode::Compare => plot::compare_view(ui, &mut self.state),
        });
    }
}
