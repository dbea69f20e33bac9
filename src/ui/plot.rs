use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::GroupColors;
use crate::data::aggregate::{AggregatedRow, Aggregation};

/// Charts with more bars than this are too dense to read.
const MAX_BARS: usize = 60;

// ---------------------------------------------------------------------------
// Average EPA per group (below the table)
// ---------------------------------------------------------------------------

pub fn epa_chart(ui: &mut Ui, summary: &Aggregation) {
    if summary.is_empty() {
        return;
    }
    if summary.rows.len() > MAX_BARS {
        ui.label(format!(
            "{} groups; narrow the selection to chart average EPA.",
            summary.rows.len()
        ));
        return;
    }

    let colors = GroupColors::new(summary);
    let bars: Vec<Bar> = summary
        .rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let epa = row.avg_epa?;
            Some(
                Bar::new(i as f64, epa)
                    .name(group_label(row))
                    .fill(colors.color_for(row))
                    .width(0.8),
            )
        })
        .collect();

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, color) in colors.legend_entries() {
            ui.label(RichText::new(format!("■ {label}")).color(color));
        }
    });

    Plot::new("epa_chart")
        .height(ui.available_height().max(160.0))
        .x_axis_label("Group")
        .y_axis_label("Average EPA")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Hover label for a bar: the group key joined with " / ".
fn group_label(row: &AggregatedRow) -> String {
    row.key
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" / ")
}
