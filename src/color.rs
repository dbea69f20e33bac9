use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::aggregate::{AggregatedRow, Aggregation};
use crate::data::model::FieldValue;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` visually distinct colours on evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Group colours: leading group-by value → Color32
// ---------------------------------------------------------------------------

/// Colours summary rows by the value of their first group-by dimension, so
/// bars for the same passer (or coverage, …) share a colour.
#[derive(Debug, Clone)]
pub struct GroupColors {
    mapping: BTreeMap<FieldValue, Color32>,
}

impl GroupColors {
    pub fn new(summary: &Aggregation) -> Self {
        let leading: BTreeSet<&FieldValue> =
            summary.rows.iter().filter_map(|r| r.key.first()).collect();
        let palette = generate_palette(leading.len());
        let mapping = leading
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();
        GroupColors { mapping }
    }

    pub fn color_for(&self, row: &AggregatedRow) -> Color32 {
        row.key
            .first()
            .and_then(|v| self.mapping.get(v))
            .copied()
            .unwrap_or(Color32::GRAY)
    }

    /// Legend entries (leading value label → colour).
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(v, c)| (v.to_string(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dimension;

    fn row(passer: &str, rushers: i64) -> AggregatedRow {
        AggregatedRow {
            key: vec![
                FieldValue::String(passer.into()),
                FieldValue::Integer(rushers),
            ],
            avg_epa: Some(0.1),
            play_count: 1,
            completion_percentage: None,
            avg_wpa: None,
            avg_air_yards: None,
            avg_time_to_throw: None,
        }
    }

    #[test]
    fn rows_sharing_leading_value_share_colour() {
        let summary = Aggregation {
            group_by: vec![Dimension::Passer, Dimension::PassRushers],
            rows: vec![row("A", 4), row("A", 5), row("B", 4)],
        };
        let colors = GroupColors::new(&summary);

        assert_eq!(colors.legend_entries().len(), 2);
        assert_eq!(
            colors.color_for(&summary.rows[0]),
            colors.color_for(&summary.rows[1])
        );
        assert_ne!(
            colors.color_for(&summary.rows[0]),
            colors.color_for(&summary.rows[2])
        );
    }
}
