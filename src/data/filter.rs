use std::collections::BTreeSet;

use super::model::{Dimension, FieldValue, PlayRecord};
use super::selection::{translate_pressure, PressureChoice, SelectionState, NOT_SPECIFIED};

// ---------------------------------------------------------------------------
// Filter kinds: how one dimension constrains the rows
// ---------------------------------------------------------------------------

/// What a single dimension lets through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    /// No constraint; the dimension is not grouped on.
    Any,
    /// Only rows where the field is null.
    NullsOnly,
    /// Rows where the field is null or one of the values.
    ValuesWithNulls(BTreeSet<FieldValue>),
    /// Rows whose field is one of the values. An empty set matches nothing.
    Values(BTreeSet<FieldValue>),
}

impl FilterKind {
    pub fn matches(&self, value: &FieldValue) -> bool {
        match self {
            FilterKind::Any => true,
            FilterKind::NullsOnly => value.is_null(),
            FilterKind::ValuesWithNulls(set) => value.is_null() || set.contains(value),
            FilterKind::Values(set) => !value.is_null() && set.contains(value),
        }
    }
}

/// One dimension's constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub dimension: Dimension,
    pub kind: FilterKind,
}

impl FieldFilter {
    /// Compile one widget's string choices.
    ///
    /// * empty → `Any`
    /// * only the sentinel → `NullsOnly`
    /// * sentinel plus values → `ValuesWithNulls`
    /// * values → `Values`
    ///
    /// Numeric dimensions keep only plain digit strings; the rest are
    /// dropped without error.
    pub fn from_choices(dimension: Dimension, choices: &[String]) -> Self {
        if dimension == Dimension::WasPressure {
            return FieldFilter::pressure(translate_pressure(choices));
        }
        if choices.is_empty() {
            return FieldFilter {
                dimension,
                kind: FilterKind::Any,
            };
        }

        let with_nulls = choices.iter().any(|c| c == NOT_SPECIFIED);
        let values: BTreeSet<FieldValue> = choices
            .iter()
            .filter(|c| c.as_str() != NOT_SPECIFIED)
            .filter_map(|c| typed_choice(dimension, c))
            .collect();

        let kind = match (with_nulls, choices.len()) {
            (true, 1) => FilterKind::NullsOnly,
            (true, _) => FilterKind::ValuesWithNulls(values),
            (false, _) => FilterKind::Values(values),
        };
        FieldFilter { dimension, kind }
    }

    pub fn pressure(choice: PressureChoice) -> Self {
        let kind = match choice {
            PressureChoice::Any => FilterKind::Any,
            // `Nothing` yields an empty set, which matches no row.
            choice => FilterKind::Values(choice.values().into_iter().map(FieldValue::Bool).collect()),
        };
        FieldFilter {
            dimension: Dimension::WasPressure,
            kind,
        }
    }

    pub fn matches(&self, play: &PlayRecord) -> bool {
        self.kind.matches(&self.dimension.value(play))
    }

    pub fn is_active(&self) -> bool {
        self.kind != FilterKind::Any
    }
}

/// A choice string as the value stored in the table for this dimension.
/// Numeric choices must be plain digit strings: no sign, no spaces.
fn typed_choice(dimension: Dimension, choice: &str) -> Option<FieldValue> {
    if dimension.is_numeric() {
        if choice.is_empty() || !choice.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        choice.parse::<i64>().ok().map(FieldValue::Integer)
    } else {
        Some(FieldValue::String(choice.to_string()))
    }
}

// ---------------------------------------------------------------------------
// FilterSpec: the full ordered list of per-dimension constraints
// ---------------------------------------------------------------------------

/// Ordered per-dimension filters; a play passes when it passes all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub filters: Vec<FieldFilter>,
}

impl FilterSpec {
    pub fn from_selection(selection: &SelectionState) -> Self {
        FilterSpec {
            filters: selection
                .iter()
                .map(|(dimension, choices)| FieldFilter::from_choices(dimension, choices))
                .collect(),
        }
    }

    pub fn matches(&self, play: &PlayRecord) -> bool {
        self.filters.iter().all(|f| f.matches(play))
    }

    /// Dimensions to group by: every constrained one, or all of them when
    /// nothing is constrained.
    pub fn group_by(&self) -> Vec<Dimension> {
        let active: Vec<Dimension> = Dimension::ALL
            .into_iter()
            .filter(|d| {
                self.filters
                    .iter()
                    .any(|f| f.dimension == *d && f.is_active())
            })
            .collect();
        if active.is_empty() {
            Dimension::ALL.to_vec()
        } else {
            active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn ints(v: &[i64]) -> BTreeSet<FieldValue> {
        v.iter().copied().map(FieldValue::Integer).collect()
    }

    #[test]
    fn choices_compile_to_kinds() {
        fn box_filter(c: &[&str]) -> FilterKind {
            FieldFilter::from_choices(Dimension::DefendersInBox, &strings(c)).kind
        }

        assert_eq!(box_filter(&[]), FilterKind::Any);
        assert_eq!(box_filter(&[NOT_SPECIFIED]), FilterKind::NullsOnly);
        assert_eq!(
            box_filter(&[NOT_SPECIFIED, "6"]),
            FilterKind::ValuesWithNulls(ints(&[6]))
        );
        assert_eq!(box_filter(&["6", "7"]), FilterKind::Values(ints(&[6, 7])));
    }

    #[test]
    fn bad_numeric_literals_are_dropped() {
        let messy = FieldFilter::from_choices(Dimension::PassRushers, &strings(&["abc", "4"]));
        let clean = FieldFilter::from_choices(Dimension::PassRushers, &strings(&["4"]));
        assert_eq!(messy, clean);

        let only_bad = FieldFilter::from_choices(Dimension::PassRushers, &strings(&["4.5"]));
        assert_eq!(only_bad.kind, FilterKind::Values(BTreeSet::new()));
        assert!(!only_bad.kind.matches(&FieldValue::Integer(4)));
    }

    #[test]
    fn categorical_choices_stay_text() {
        let f = FieldFilter::from_choices(Dimension::CoverageType, &strings(&["COVER_3"]));
        assert!(f.kind.matches(&FieldValue::String("COVER_3".into())));
        assert!(!f.kind.matches(&FieldValue::String("COVER_1".into())));
        assert!(!f.kind.matches(&FieldValue::Null));

        let with_nulls = FieldFilter::from_choices(
            Dimension::CoverageType,
            &strings(&[NOT_SPECIFIED, "COVER_3"]),
        );
        assert_eq!(
            with_nulls.kind,
            FilterKind::ValuesWithNulls([FieldValue::String("COVER_3".into())].into())
        );
        assert!(with_nulls.kind.matches(&FieldValue::Null));
        assert!(with_nulls.kind.matches(&FieldValue::String("COVER_3".into())));
        assert!(!with_nulls.kind.matches(&FieldValue::String("COVER_1".into())));
    }

    #[test]
    fn signed_or_padded_numbers_are_dropped() {
        for literal in ["+4", " 4", "4 ", "-1", ""] {
            let f = FieldFilter::from_choices(Dimension::PassRushers, &strings(&[literal]));
            assert_eq!(f.kind, FilterKind::Values(BTreeSet::new()), "{literal:?}");
        }
        let mixed = FieldFilter::from_choices(Dimension::PassRushers, &strings(&["+4", "5"]));
        assert_eq!(mixed.kind, FilterKind::Values(ints(&[5])));
    }

    #[test]
    fn pressure_neither_matches_nothing_both_matches_all() {
        let neither = FieldFilter::from_choices(Dimension::WasPressure, &[]);
        assert!(neither.is_active());
        assert!(!neither.kind.matches(&FieldValue::Bool(true)));
        assert!(!neither.kind.matches(&FieldValue::Bool(false)));
        assert!(!neither.kind.matches(&FieldValue::Null));

        let both = FieldFilter::from_choices(Dimension::WasPressure, &strings(&["Yes", "No"]));
        assert_eq!(both.kind, FilterKind::Any);
        assert!(both.kind.matches(&FieldValue::Null));

        let yes = FieldFilter::from_choices(Dimension::WasPressure, &strings(&["Yes"]));
        assert!(yes.kind.matches(&FieldValue::Bool(true)));
        assert!(!yes.kind.matches(&FieldValue::Bool(false)));
    }

    #[test]
    fn group_by_falls_back_to_all_dimensions() {
        let spec = FilterSpec::from_selection(&SelectionState::default());
        assert_eq!(spec.group_by(), Dimension::ALL.to_vec());
    }

    #[test]
    fn group_by_keeps_fixed_order() {
        let selection = SelectionState::default()
            .with(Dimension::PassRushers, ["4"])
            .with(Dimension::Passer, ["QB"]);
        let spec = FilterSpec::from_selection(&selection);
        assert_eq!(
            spec.group_by(),
            vec![Dimension::Passer, Dimension::PassRushers]
        );
    }
}
