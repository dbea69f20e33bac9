use std::collections::BTreeMap;

use super::model::Dimension;

/// Pseudo-value in a selection list standing for "field is null".
pub const NOT_SPECIFIED: &str = "Not Specified";

pub const PRESSURE_YES: &str = "Yes";
pub const PRESSURE_NO: &str = "No";

// ---------------------------------------------------------------------------
// Selection state: what the user picked in each widget
// ---------------------------------------------------------------------------

/// The user's current choices, one string list per dimension.
///
/// For every dimension except pressure an empty list means "any". The
/// pressure list holds `"Yes"` / `"No"` and is translated with
/// [`translate_pressure`]: there an empty list means "nothing".
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    choices: BTreeMap<Dimension, Vec<String>>,
}

impl Default for SelectionState {
    /// Nothing narrowed down; both pressure options ticked.
    fn default() -> Self {
        let mut state = SelectionState {
            choices: BTreeMap::new(),
        };
        state.set(
            Dimension::WasPressure,
            vec![PRESSURE_YES.to_string(), PRESSURE_NO.to_string()],
        );
        state
    }
}

impl SelectionState {
    /// A state with every list empty, including pressure.
    pub fn empty() -> Self {
        SelectionState {
            choices: BTreeMap::new(),
        }
    }

    /// Builder-style helper.
    pub fn with<S: Into<String>>(
        mut self,
        dimension: Dimension,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.set(dimension, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn set(&mut self, dimension: Dimension, values: Vec<String>) {
        self.choices.insert(dimension, values);
    }

    /// Chosen values for a dimension (empty if never set).
    pub fn values(&self, dimension: Dimension) -> &[String] {
        self.choices
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_selected(&self, dimension: Dimension, value: &str) -> bool {
        self.values(dimension).iter().any(|v| v == value)
    }

    /// Toggle one option, keeping the list in the order the options were picked.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        let selected = self.choices.entry(dimension).or_default();
        if let Some(pos) = selected.iter().position(|v| v == value) {
            selected.remove(pos);
        } else {
            selected.push(value.to_string());
        }
    }

    pub fn clear(&mut self, dimension: Dimension) {
        self.choices.insert(dimension, Vec::new());
    }

    /// Iterate dimensions in fixed order with their chosen values.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &[String])> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.values(d)))
    }
}

// ---------------------------------------------------------------------------
// Pressure: "Yes"/"No" widget → boolean filter
// ---------------------------------------------------------------------------

/// Resolved pressure choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureChoice {
    /// Both options ticked: no constraint.
    Any,
    Only(bool),
    /// Neither option ticked: matches no play at all.
    Nothing,
}

impl PressureChoice {
    /// Boolean values to filter on. `Any` and `Nothing` both give an empty
    /// list; callers must distinguish them by variant.
    pub fn values(self) -> Vec<bool> {
        match self {
            PressureChoice::Only(b) => vec![b],
            PressureChoice::Any | PressureChoice::Nothing => Vec::new(),
        }
    }
}

pub fn translate_pressure(selected: &[String]) -> PressureChoice {
    let yes = selected.iter().any(|v| v == PRESSURE_YES);
    let no = selected.iter().any(|v| v == PRESSURE_NO);
    match (yes, no) {
        (true, true) => PressureChoice::Any,
        (true, false) => PressureChoice::Only(true),
        (false, true) => PressureChoice::Only(false),
        (false, false) => PressureChoice::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pressure_translation() {
        assert_eq!(
            translate_pressure(&strings(&["Yes", "No"])),
            PressureChoice::Any
        );
        assert_eq!(
            translate_pressure(&strings(&["No", "Yes"])),
            PressureChoice::Any
        );
        assert_eq!(
            translate_pressure(&strings(&["Yes"])),
            PressureChoice::Only(true)
        );
        assert_eq!(
            translate_pressure(&strings(&["No"])),
            PressureChoice::Only(false)
        );
        assert_eq!(translate_pressure(&[]), PressureChoice::Nothing);
        assert_eq!(PressureChoice::Only(false).values(), vec![false]);
        assert!(PressureChoice::Any.values().is_empty());
    }

    #[test]
    fn default_ticks_both_pressure_options() {
        let state = SelectionState::default();
        assert_eq!(
            translate_pressure(state.values(Dimension::WasPressure)),
            PressureChoice::Any
        );
        assert!(state.values(Dimension::Passer).is_empty());
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut state = SelectionState::empty();
        state.toggle(Dimension::DefendersInBox, "6");
        state.toggle(Dimension::DefendersInBox, NOT_SPECIFIED);
        assert_eq!(
            state.values(Dimension::DefendersInBox),
            &strings(&["6", NOT_SPECIFIED])[..]
        );
        state.toggle(Dimension::DefendersInBox, "6");
        assert!(state.is_selected(Dimension::DefendersInBox, NOT_SPECIFIED));
        assert!(!state.is_selected(Dimension::DefendersInBox, "6"));
    }

    #[test]
    fn iter_follows_dimension_order() {
        let state = SelectionState::empty()
            .with(Dimension::WasPressure, ["Yes"])
            .with(Dimension::Passer, ["QB"]);
        let order: Vec<Dimension> = state.iter().map(|(d, _)| d).collect();
        assert_eq!(order, Dimension::ALL.to_vec());
    }
}
