use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{AggregatedRow, Aggregation};

/// Shown instead of the table when no group survives the filters.
pub const EMPTY_MESSAGE: &str = "Please make a selection to view data.";

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Summary table (central panel)
// ---------------------------------------------------------------------------

pub fn summary_table(ui: &mut Ui, summary: &Aggregation) {
    if summary.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(EMPTY_MESSAGE);
        });
        return;
    }

    let headers = summary.column_names();
    let n_keys = summary.group_by.len();

    TableBuilder::new(ui)
        .id_salt("summary_table")
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(80.0), n_keys)
        .columns(Column::auto().at_least(70.0), headers.len() - n_keys)
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in &headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(*name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, summary.rows.len(), |mut table_row| {
                let row = &summary.rows[table_row.index()];
                for cell in row_cells(row) {
                    table_row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

/// Display strings for one summary row, in [`Aggregation::column_names`] order.
pub fn row_cells(row: &AggregatedRow) -> Vec<String> {
    row.key
        .iter()
        .map(|v| {
            if v.is_null() {
                "None".to_string()
            } else {
                v.to_string()
            }
        })
        .chain([
            fmt_metric(row.avg_epa, 3),
            row.play_count.to_string(),
            fmt_metric(row.completion_percentage, 1),
            fmt_metric(row.avg_wpa, 4),
            fmt_metric(row.avg_air_yards, 2),
            fmt_metric(row.avg_time_to_throw, 2),
        ])
        .collect()
}

fn fmt_metric(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.decimals$}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FieldValue;

    #[test]
    fn cells_follow_column_order() {
        let row = AggregatedRow {
            key: vec![FieldValue::String("QB".into()), FieldValue::Null],
            avg_epa: Some(0.12345),
            play_count: 14,
            completion_percentage: Some(62.5),
            avg_wpa: None,
            avg_air_yards: Some(7.456),
            avg_time_to_throw: Some(2.8),
        };
        assert_eq!(
            row_cells(&row),
            vec!["QB", "None", "0.123", "14", "62.5", "NaN", "7.46", "2.80"]
        );
    }
}
