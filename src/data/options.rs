use super::model::{Dimension, FieldValue, PlayTable};
use super::selection::{NOT_SPECIFIED, PRESSURE_NO, PRESSURE_YES};

/// Non-null values as strings, sorted as strings.
pub fn sorted_options<'a>(values: impl IntoIterator<Item = &'a FieldValue>) -> Vec<String> {
    let mut options: Vec<String> = values
        .into_iter()
        .filter(|v| !v.is_null())
        .map(ToString::to_string)
        .collect();
    options.sort();
    options.dedup();
    options
}

/// Non-null values sorted numerically, rendered as integers, with the
/// "not specified" option first.
pub fn sorted_options_with_null<'a>(
    values: impl IntoIterator<Item = &'a FieldValue>,
) -> Vec<String> {
    let mut numbers: Vec<i64> = values.into_iter().filter_map(FieldValue::as_i64).collect();
    numbers.sort_unstable();
    numbers.dedup();

    std::iter::once(NOT_SPECIFIED.to_string())
        .chain(numbers.into_iter().map(|n| n.to_string()))
        .collect()
}

/// Options offered by a dimension's widget.
pub fn widget_options(table: &PlayTable, dimension: Dimension) -> Vec<String> {
    match dimension {
        Dimension::WasPressure => vec![PRESSURE_YES.to_string(), PRESSURE_NO.to_string()],
        d if d.is_numeric() => sorted_options_with_null(&table.distinct(d)),
        d => sorted_options(&table.distinct(d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PlayRecord;

    #[test]
    fn plain_options_drop_nulls_and_sort() {
        let values = [
            FieldValue::String("COVER_3".into()),
            FieldValue::Null,
            FieldValue::String("COVER_1".into()),
            FieldValue::String("2_MAN".into()),
        ];
        assert_eq!(sorted_options(&values), vec!["2_MAN", "COVER_1", "COVER_3"]);
    }

    #[test]
    fn null_option_comes_first_and_numbers_sort_numerically() {
        let values = [
            FieldValue::Float(10.0),
            FieldValue::Null,
            FieldValue::Float(6.0),
            FieldValue::Integer(7),
        ];
        assert_eq!(
            sorted_options_with_null(&values),
            vec![NOT_SPECIFIED, "6", "7", "10"]
        );
    }

    #[test]
    fn widget_options_match_filter_encoding() {
        let table = PlayTable::new(vec![
            PlayRecord {
                passer: Some("B.QB".into()),
                defenders_in_box: Some(7),
                ..Default::default()
            },
            PlayRecord {
                passer: Some("A.QB".into()),
                defenders_in_box: None,
                ..Default::default()
            },
        ]);
        assert_eq!(
            widget_options(&table, Dimension::Passer),
            vec!["A.QB", "B.QB"]
        );
        assert_eq!(
            widget_options(&table, Dimension::DefendersInBox),
            vec![NOT_SPECIFIED, "7"]
        );
        assert_eq!(
            widget_options(&table, Dimension::WasPressure),
            vec!["Yes", "No"]
        );
        assert_eq!(
            widget_options(&table, Dimension::PassRushers),
            vec![NOT_SPECIFIED]
        );
    }
}
