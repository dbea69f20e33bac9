use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// FieldValue – a single cell of the play-by-play table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as it appears in the source files.
/// Group keys and filter sets live in `BTreeMap` / `BTreeSet`, so `FieldValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => write!(f, "<null>"),
        }
    }
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Interpret the value as a real number. NaN counts as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) if v.is_nan() => None,
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::String(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
            _ => None,
        }
    }

    /// Interpret the value as a whole number. Floats only qualify when they
    /// have no fractional part (`6.0` from a float column is `6`).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            FieldValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .and_then(|v| FieldValue::Float(v).as_i64())
                })
            }
            _ => None,
        }
    }

    /// Interpret 0/1 style indicators, booleans and their common text spellings.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Integer(i) => Some(*i != 0),
            FieldValue::Float(v) if v.is_nan() => None,
            FieldValue::Float(v) => Some(*v != 0.0),
            FieldValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "1.0" | "true" | "t" | "yes" => Some(true),
                "0" | "0.0" | "false" | "f" | "no" => Some(false),
                _ => None,
            },
            FieldValue::Null => None,
        }
    }

    /// Text content; empty strings and the `NA` marker count as missing.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::String(s) if s.is_empty() || s == "NA" => None,
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(v: Option<String>) -> Self {
        v.map_or(FieldValue::Null, FieldValue::String)
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(FieldValue::Null, FieldValue::Integer)
    }
}

impl From<Option<bool>> for FieldValue {
    fn from(v: Option<bool>) -> Self {
        v.map_or(FieldValue::Null, FieldValue::Bool)
    }
}

// ---------------------------------------------------------------------------
// PlayRecord – one row of the play-by-play table
// ---------------------------------------------------------------------------

/// Source column names read from a season file.
pub mod columns {
    pub const PASSER: &str = "passer";
    pub const PASS: &str = "pass";
    pub const PLAY_TYPE: &str = "play_type";
    pub const QB_KNEEL: &str = "qb_kneel";
    pub const QB_SPIKE: &str = "qb_spike";
    pub const QB_SCRAMBLE: &str = "qb_scramble";
    pub const COMPLETE_PASS: &str = "complete_pass";
    pub const EPA: &str = "epa";
    pub const WPA: &str = "wpa";
    pub const AIR_YARDS: &str = "air_yards";
    pub const TIME_TO_THROW: &str = "time_to_throw";
    pub const COVERAGE_TYPE: &str = "defense_coverage_type";
    pub const MAN_ZONE_TYPE: &str = "defense_man_zone_type";
    pub const DEFENDERS_IN_BOX: &str = "defenders_in_box";
    pub const PASS_RUSHERS: &str = "number_of_pass_rushers";
    pub const WAS_PRESSURE: &str = "was_pressure";

    /// Columns without which a file is not a play-by-play table. The kneel and
    /// spike flags are needed to tell real passes apart.
    pub const REQUIRED: [&str; 5] = [PASSER, PASS, PLAY_TYPE, QB_KNEEL, QB_SPIKE];

    pub const ALL: [&str; 16] = [
        PASSER,
        PASS,
        PLAY_TYPE,
        QB_KNEEL,
        QB_SPIKE,
        QB_SCRAMBLE,
        COMPLETE_PASS,
        EPA,
        WPA,
        AIR_YARDS,
        TIME_TO_THROW,
        COVERAGE_TYPE,
        MAN_ZONE_TYPE,
        DEFENDERS_IN_BOX,
        PASS_RUSHERS,
        WAS_PRESSURE,
    ];
}

/// A single play.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayRecord {
    pub passer: Option<String>,
    pub pass: Option<bool>,
    /// `"no_play"` marks plays wiped out by a penalty.
    pub play_type: Option<String>,
    pub qb_kneel: Option<bool>,
    pub qb_spike: Option<bool>,
    pub qb_scramble: Option<bool>,
    pub complete_pass: Option<bool>,
    /// Expected points added.
    pub epa: Option<f64>,
    /// Win probability added.
    pub wpa: Option<f64>,
    pub air_yards: Option<f64>,
    /// Seconds from snap to throw.
    pub time_to_throw: Option<f64>,
    pub defense_coverage_type: Option<String>,
    pub defense_man_zone_type: Option<String>,
    pub defenders_in_box: Option<i64>,
    pub number_of_pass_rushers: Option<i64>,
    pub was_pressure: Option<bool>,
}

impl PlayRecord {
    /// Build a record from a column lookup. Unknown columns resolve to `Null`.
    pub fn from_cells(cell: impl Fn(&str) -> FieldValue) -> Self {
        PlayRecord {
            passer: cell(columns::PASSER).as_text(),
            pass: cell(columns::PASS).as_flag(),
            play_type: cell(columns::PLAY_TYPE).as_text(),
            qb_kneel: cell(columns::QB_KNEEL).as_flag(),
            qb_spike: cell(columns::QB_SPIKE).as_flag(),
            qb_scramble: cell(columns::QB_SCRAMBLE).as_flag(),
            complete_pass: cell(columns::COMPLETE_PASS).as_flag(),
            epa: cell(columns::EPA).as_f64(),
            wpa: cell(columns::WPA).as_f64(),
            air_yards: cell(columns::AIR_YARDS).as_f64(),
            time_to_throw: cell(columns::TIME_TO_THROW).as_f64(),
            defense_coverage_type: cell(columns::COVERAGE_TYPE).as_text(),
            defense_man_zone_type: cell(columns::MAN_ZONE_TYPE).as_text(),
            defenders_in_box: cell(columns::DEFENDERS_IN_BOX).as_i64(),
            number_of_pass_rushers: cell(columns::PASS_RUSHERS).as_i64(),
            was_pressure: cell(columns::WAS_PRESSURE).as_flag(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dimension – the fields a user can filter and group by
// ---------------------------------------------------------------------------

/// Filterable dimensions, declared in display / group-by order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Passer,
    CoverageType,
    ManZoneType,
    DefendersInBox,
    PassRushers,
    WasPressure,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Passer,
        Dimension::CoverageType,
        Dimension::ManZoneType,
        Dimension::DefendersInBox,
        Dimension::PassRushers,
        Dimension::WasPressure,
    ];

    /// Column name in the source data and in the summary table.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Passer => columns::PASSER,
            Dimension::CoverageType => columns::COVERAGE_TYPE,
            Dimension::ManZoneType => columns::MAN_ZONE_TYPE,
            Dimension::DefendersInBox => columns::DEFENDERS_IN_BOX,
            Dimension::PassRushers => columns::PASS_RUSHERS,
            Dimension::WasPressure => columns::WAS_PRESSURE,
        }
    }

    /// Widget label.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Passer => "Passer",
            Dimension::CoverageType => "Defense Coverage Type",
            Dimension::ManZoneType => "Man/Zone Type",
            Dimension::DefendersInBox => "Defenders in Box",
            Dimension::PassRushers => "Number of Pass Rushers",
            Dimension::WasPressure => "Was Pressure?",
        }
    }

    /// Whether selections for this dimension are integer literals.
    pub fn is_numeric(self) -> bool {
        matches!(self, Dimension::DefendersInBox | Dimension::PassRushers)
    }

    /// The value of this dimension for a play.
    pub fn value(self, play: &PlayRecord) -> FieldValue {
        match self {
            Dimension::Passer => play.passer.clone().into(),
            Dimension::CoverageType => play.defense_coverage_type.clone().into(),
            Dimension::ManZoneType => play.defense_man_zone_type.clone().into(),
            Dimension::DefendersInBox => play.defenders_in_box.into(),
            Dimension::PassRushers => play.number_of_pass_rushers.into(),
            Dimension::WasPressure => play.was_pressure.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// PlayTable – a loaded season
// ---------------------------------------------------------------------------

/// An in-memory table of plays. Never mutated once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayTable {
    pub plays: Vec<PlayRecord>,
}

impl PlayTable {
    pub fn new(plays: Vec<PlayRecord>) -> Self {
        PlayTable { plays }
    }

    /// Number of plays.
    pub fn len(&self) -> usize {
        self.plays.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    /// Sorted set of distinct values of a dimension, nulls included.
    pub fn distinct(&self, dimension: Dimension) -> BTreeSet<FieldValue> {
        self.plays.iter().map(|p| dimension.value(p)).collect()
    }
}
