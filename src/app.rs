use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PassDashboardApp {
    pub state: AppState,
}

impl PassDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PassDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selections ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: summary table and EPA chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("NFL Pass Play Analysis");
            ui.separator();

            let Some(summary) = &self.state.summary else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a play-by-play file to begin  (File → Open…)");
                });
                return;
            };

            if summary.is_empty() {
                table::summary_table(ui, summary);
                return;
            }

            let table_height = (ui.available_height() * 0.6).max(120.0);
            egui::TopBottomPanel::bottom("epa_chart_panel")
                .resizable(true)
                .min_height(160.0)
                .show_inside(ui, |ui| {
                    plot::epa_chart(ui, summary);
                });
            egui::ScrollArea::horizontal()
                .max_height(table_height)
                .show(ui, |ui: &mut Ui| {
                    table::summary_table(ui, summary);
                });
        });
    }
}
