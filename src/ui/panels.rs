use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(data) = &state.data else {
        ui.label("No season loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let options = data.options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dimension in Dimension::ALL {
                let Some(all_values) = options.get(&dimension) else {
                    continue;
                };

                // Show count of selected / total in the header
                let n_selected = state.selection.values(dimension).len();
                let n_total = all_values.len();
                let header_text = format!("{}  ({n_selected}/{n_total})", dimension.label());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dimension.column())
                    .default_open(dimension == Dimension::WasPressure)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dimension);
                            }
                            if ui.small_button("Clear").clicked() {
                                state.select_none(dimension);
                            }
                        });

                        for value in all_values {
                            let mut checked = state.selection.is_selected(dimension, value);
                            if ui.checkbox(&mut checked, value.as_str()).changed() {
                                state.toggle(dimension, value);
                            }
                        }
                    });
            }
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

        if let Some(data) = &state.data {
            let file_name = data
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{file_name}: {} plays, {} qualifying passes",
                data.raw_plays,
                data.plays.len()
            ));
        }

        if let Some(summary) = &state.summary {
            ui.separator();
            ui.label(format!(
                "{} groups, {} plays selected",
                summary.rows.len(),
                summary.total_plays()
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
        .set_title("Open play-by-play data")
        .set_directory(&state.config.data_dir)
        .add_filter("Supported files", &["parquet", "pq", "csv", "json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}
