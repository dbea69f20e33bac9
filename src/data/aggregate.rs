use std::collections::BTreeMap;

use super::filter::FilterSpec;
use super::model::{Dimension, FieldValue, PlayRecord, PlayTable};
use super::selection::SelectionState;

/// Metric columns appended after the group-by columns.
pub const METRIC_COLUMNS: [&str; 6] = [
    "avg_epa",
    "play_count",
    "completion_percentage",
    "avg_wpa",
    "avg_air_yards",
    "avg_time_to_throw",
];

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One summary row per distinct group key.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    /// Values of the group-by dimensions, in [`Aggregation::group_by`] order.
    pub key: Vec<FieldValue>,
    pub avg_epa: Option<f64>,
    pub play_count: usize,
    /// Share of non-scramble attempts completed, 0–100.
    pub completion_percentage: Option<f64>,
    pub avg_wpa: Option<f64>,
    pub avg_air_yards: Option<f64>,
    pub avg_time_to_throw: Option<f64>,
}

/// The summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub group_by: Vec<Dimension>,
    pub rows: Vec<AggregatedRow>,
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Group-by column names followed by the metric columns.
    pub fn column_names(&self) -> Vec<&'static str> {
        self.group_by
            .iter()
            .map(|d| d.column())
            .chain(METRIC_COLUMNS)
            .collect()
    }

    /// Total plays across all groups.
    pub fn total_plays(&self) -> usize {
        self.rows.iter().map(|r| r.play_count).sum()
    }
}

// ---------------------------------------------------------------------------
// Accumulators
// ---------------------------------------------------------------------------

/// Mean over the non-null values seen.
#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[derive(Debug, Default)]
struct GroupAccumulator {
    plays: usize,
    epa: Mean,
    wpa: Mean,
    air_yards: Mean,
    time_to_throw: Mean,
    completions: usize,
    attempts: usize,
}

impl GroupAccumulator {
    fn push(&mut self, play: &PlayRecord, valid_pass_attempt: Option<bool>) {
        self.plays += 1;
        self.epa.push(play.epa);
        self.wpa.push(play.wpa);
        self.air_yards.push(play.air_yards);
        self.time_to_throw.push(play.time_to_throw);
        if let Some(complete) = valid_pass_attempt {
            self.attempts += 1;
            self.completions += usize::from(complete);
        }
    }

    fn finish(self, key: Vec<FieldValue>) -> AggregatedRow {
        AggregatedRow {
            key,
            avg_epa: self.epa.value(),
            play_count: self.plays,
            completion_percentage: (self.attempts > 0)
                .then(|| self.completions as f64 / self.attempts as f64 * 100.0),
            avg_wpa: self.wpa.value(),
            avg_air_yards: self.air_yards.value(),
            avg_time_to_throw: self.time_to_throw.value(),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Completion flag for attempts that count toward completion percentage:
/// `None` for scrambles (or plays with an unknown scramble flag).
pub fn valid_pass_attempt(play: &PlayRecord) -> Option<bool> {
    match play.qb_scramble {
        Some(false) => play.complete_pass,
        _ => None,
    }
}

/// Filter `table` by `spec` and summarise per group.
///
/// Rows come out ordered by group key, nulls first. The table is only read.
pub fn aggregate(table: &PlayTable, spec: &FilterSpec) -> Aggregation {
    let group_by = spec.group_by();
    let mut groups: BTreeMap<Vec<FieldValue>, GroupAccumulator> = BTreeMap::new();

    let mut kept = 0usize;
    for play in table.plays.iter().filter(|p| spec.matches(p)) {
        kept += 1;
        let key: Vec<FieldValue> = group_by.iter().map(|d| d.value(play)).collect();
        groups
            .entry(key)
            .or_default()
            .push(play, valid_pass_attempt(play));
    }

    log::debug!(
        "Aggregated {kept} of {} plays into {} groups by {:?}",
        table.len(),
        groups.len(),
        group_by
    );

    let rows = groups
        .into_iter()
        .map(|(key, acc)| acc.finish(key))
        .collect();
    Aggregation { group_by, rows }
}

/// Compile the selection and aggregate in one step.
pub fn filter_and_aggregate(table: &PlayTable, selection: &SelectionState) -> Aggregation {
    aggregate(table, &FilterSpec::from_selection(selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::pass_play;
    use crate::data::selection::NOT_SPECIFIED;

    fn play(passer: &str, box_count: Option<i64>, rushers: Option<i64>) -> PlayRecord {
        PlayRecord {
            defenders_in_box: box_count,
            number_of_pass_rushers: rushers,
            ..pass_play(passer)
        }
    }

    fn sample_table() -> PlayTable {
        PlayTable::new(vec![
            play("A.Passer", Some(6), Some(4)),
            play("A.Passer", Some(7), Some(5)),
            play("A.Passer", None, Some(4)),
            play("B.Passer", Some(6), None),
            play("B.Passer", Some(8), Some(3)),
            play("B.Passer", None, Some(4)),
        ])
    }

    fn column_values(agg: &Aggregation, dimension: Dimension) -> Vec<FieldValue> {
        let idx = agg
            .group_by
            .iter()
            .position(|d| *d == dimension)
            .expect("dimension is grouped");
        agg.rows.iter().map(|r| r.key[idx].clone()).collect()
    }

    #[test]
    fn default_selection_groups_by_all_dimensions() {
        let agg = filter_and_aggregate(&sample_table(), &SelectionState::default());
        assert_eq!(agg.group_by, Dimension::ALL.to_vec());
        assert_eq!(agg.total_plays(), 6);
        assert_eq!(
            agg.column_names()[..6],
            [
                "passer",
                "defense_coverage_type",
                "defense_man_zone_type",
                "defenders_in_box",
                "number_of_pass_rushers",
                "was_pressure"
            ]
        );
    }

    #[test]
    fn sentinel_with_value_keeps_nulls_and_value() {
        let selection =
            SelectionState::default().with(Dimension::DefendersInBox, [NOT_SPECIFIED, "6"]);
        let agg = filter_and_aggregate(&sample_table(), &selection);

        assert_eq!(agg.group_by, vec![Dimension::DefendersInBox]);
        assert_eq!(
            column_values(&agg, Dimension::DefendersInBox),
            vec![FieldValue::Null, FieldValue::Integer(6)]
        );
        assert_eq!(agg.rows[0].play_count, 2);
        assert_eq!(agg.rows[1].play_count, 2);
    }

    #[test]
    fn sentinel_alone_keeps_only_nulls() {
        let selection = SelectionState::default().with(Dimension::DefendersInBox, [NOT_SPECIFIED]);
        let agg = filter_and_aggregate(&sample_table(), &selection);

        assert_eq!(agg.rows.len(), 1);
        assert_eq!(agg.rows[0].key, vec![FieldValue::Null]);
        assert_eq!(agg.rows[0].play_count, 2);
    }

    #[test]
    fn pressure_neither_is_empty_both_is_any() {
        let table = sample_table();

        let neither = SelectionState::empty();
        assert!(filter_and_aggregate(&table, &neither).is_empty());

        let both = SelectionState::default();
        assert_eq!(filter_and_aggregate(&table, &both).total_plays(), table.len());
    }

    #[test]
    fn pressure_yes_keeps_pressured_plays() {
        let mut pressured = play("A.Passer", Some(6), Some(4));
        pressured.was_pressure = Some(true);
        let table = PlayTable::new(vec![pressured, play("A.Passer", Some(6), Some(4))]);

        let agg = filter_and_aggregate(
            &table,
            &SelectionState::empty().with(Dimension::WasPressure, ["Yes"]),
        );
        assert_eq!(agg.group_by, vec![Dimension::WasPressure]);
        assert_eq!(agg.rows.len(), 1);
        assert_eq!(agg.rows[0].key, vec![FieldValue::Bool(true)]);
        assert_eq!(agg.rows[0].play_count, 1);
    }

    #[test]
    fn scrambles_excluded_from_completion_percentage() {
        let mut plays = Vec::new();
        for complete in [true, true, false] {
            plays.push(PlayRecord {
                complete_pass: Some(complete),
                ..pass_play("QB")
            });
        }
        // Scrambles are recorded as incomplete; they must not drag the rate down.
        for _ in 0..3 {
            plays.push(PlayRecord {
                qb_scramble: Some(true),
                complete_pass: Some(false),
                ..pass_play("QB")
            });
        }
        let selection = SelectionState::default().with(Dimension::Passer, ["QB"]);
        let agg = filter_and_aggregate(&PlayTable::new(plays), &selection);

        let row = &agg.rows[0];
        assert_eq!(row.play_count, 6);
        let pct = row.completion_percentage.expect("has attempts");
        assert!((pct - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn completion_percentage_absent_when_only_scrambles() {
        let plays = vec![PlayRecord {
            qb_scramble: Some(true),
            ..pass_play("QB")
        }];
        let selection = SelectionState::default().with(Dimension::Passer, ["QB"]);
        let agg = filter_and_aggregate(&PlayTable::new(plays), &selection);
        assert_eq!(agg.rows[0].completion_percentage, None);
    }

    #[test]
    fn means_skip_missing_values() {
        let plays = vec![
            PlayRecord {
                epa: Some(1.0),
                air_yards: None,
                time_to_throw: Some(2.0),
                ..pass_play("QB")
            },
            PlayRecord {
                epa: Some(-0.5),
                air_yards: Some(10.0),
                time_to_throw: Some(3.0),
                ..pass_play("QB")
            },
        ];
        let selection = SelectionState::default().with(Dimension::Passer, ["QB"]);
        let row = filter_and_aggregate(&PlayTable::new(plays), &selection).rows[0].clone();

        assert_eq!(row.avg_epa, Some(0.25));
        assert_eq!(row.avg_air_yards, Some(10.0));
        assert_eq!(row.avg_time_to_throw, Some(2.5));
        assert_eq!(row.avg_wpa, Some(0.01));
    }

    #[test]
    fn numeric_garbage_behaves_like_clean_input() {
        let table = sample_table();
        let messy = SelectionState::default().with(Dimension::PassRushers, ["abc", "4"]);
        let clean = SelectionState::default().with(Dimension::PassRushers, ["4"]);

        let agg = filter_and_aggregate(&table, &messy);
        assert_eq!(agg, filter_and_aggregate(&table, &clean));
        assert_eq!(agg.total_plays(), 3);
    }

    #[test]
    fn repeated_runs_are_identical_and_table_untouched() {
        let table = sample_table();
        let before = table.clone();
        let selection = SelectionState::default()
            .with(Dimension::Passer, ["B.Passer", "A.Passer"])
            .with(Dimension::DefendersInBox, [NOT_SPECIFIED, "6", "8"]);

        let first = filter_and_aggregate(&table, &selection);
        let second = filter_and_aggregate(&table, &selection);
        assert_eq!(first, second);
        assert_eq!(table, before);

        let passers = column_values(&first, Dimension::Passer);
        let mut sorted = passers.clone();
        sorted.sort();
        assert_eq!(passers, sorted);
    }
}
