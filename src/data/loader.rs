use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use serde_json::Value as JsonValue;

use super::model::{columns, FieldValue, PlayRecord, PlayTable};

/// Structural problems with a play-by-play file.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("no play-by-play file for season {season} in {}", .dir.display())]
    SeasonNotFound { season: u16, dir: PathBuf },
}

/// Extensions tried, in order, when looking for a season file.
const SEASON_EXTENSIONS: [&str; 3] = ["parquet", "csv", "json"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// File name nflverse uses for a season's play-by-play export.
pub fn season_file_stem(season: u16) -> String {
    format!("play_by_play_{season}")
}

/// Find `play_by_play_<season>.{parquet,csv,json}` in `dir`.
pub fn resolve_season_file(dir: &Path, season: u16) -> Result<PathBuf, SchemaError> {
    let stem = season_file_stem(season);
    SEASON_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
        .ok_or_else(|| SchemaError::SeasonNotFound {
            season,
            dir: dir.to_path_buf(),
        })
}

/// Load a play-by-play table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – nflverse release files; only the needed columns are read
/// * `.csv`     – header row, `NA` or empty cells are null
/// * `.json`    – `[{ "passer": "...", "epa": 0.3, ... }, ...]`
pub fn load_file(path: &Path) -> Result<PlayTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(SchemaError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} plays from {}", table.len(), path.display());
    Ok(table)
}

fn check_required<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<(), SchemaError> {
    let present: BTreeSet<&str> = present.into_iter().collect();
    for name in columns::REQUIRED {
        if !present.contains(name) {
            return Err(SchemaError::MissingColumn(name));
        }
    }
    for name in columns::ALL {
        if !present.contains(name) {
            log::warn!("Column '{name}' not found; treating it as all null");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by R arrow (nflverse releases), Pandas and Polars.
/// Numeric columns of any width are read as `f64`, strings and dictionaries as text.
fn load_parquet(path: &Path) -> Result<PlayTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let arrow_schema = builder.schema().clone();
    check_required(arrow_schema.fields().iter().map(|f| f.name().as_str()))?;

    let roots: Vec<usize> = arrow_schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| columns::ALL.contains(&f.name().as_str()))
        .map(|(i, _)| i)
        .collect();
    let mask = ProjectionMask::roots(builder.parquet_schema(), roots);
    let reader = builder
        .with_projection(mask)
        .build()
        .context("building parquet reader")?;

    let mut plays = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut batch_columns: BTreeMap<&str, ArrayRef> = BTreeMap::new();
        for name in columns::ALL {
            if let Ok(idx) = schema.index_of(name) {
                let normalized = normalize_column(batch.column(idx))
                    .with_context(|| format!("column '{name}'"))?;
                batch_columns.insert(name, normalized);
            }
        }

        for row in 0..batch.num_rows() {
            plays.push(PlayRecord::from_cells(|name| {
                batch_columns
                    .get(name)
                    .map_or(FieldValue::Null, |col| cell_value(col, row))
            }));
        }
    }

    Ok(PlayTable::new(plays))
}

/// Cast a column to one of `Float64`, `Boolean` or `Utf8`.
fn normalize_column(col: &ArrayRef) -> Result<ArrayRef> {
    let target = match col.data_type() {
        DataType::Float64 | DataType::Boolean | DataType::Utf8 | DataType::Null => {
            return Ok(col.clone())
        }
        dt if dt.is_numeric() => DataType::Float64,
        _ => DataType::Utf8,
    };
    cast(col, &target).with_context(|| format!("casting {} to {target}", col.data_type()))
}

fn cell_value(col: &ArrayRef, row: usize) -> FieldValue {
    if col.is_null(row) {
        return FieldValue::Null;
    }
    match col.data_type() {
        DataType::Float64 => FieldValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => FieldValue::Bool(col.as_boolean().value(row)),
        DataType::Utf8 => FieldValue::String(col.as_string::<i32>().value(row).to_string()),
        _ => FieldValue::Null,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<PlayTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_required(headers.iter())?;

    let index: BTreeMap<&str, usize> = columns::ALL
        .iter()
        .filter_map(|name| headers.iter().position(|h| h == *name).map(|i| (*name, i)))
        .collect();

    let mut plays = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        plays.push(PlayRecord::from_cells(|name| {
            index
                .get(name)
                .and_then(|&i| record.get(i))
                .map_or(FieldValue::Null, guess_field_type)
        }));
    }

    Ok(PlayTable::new(plays))
}

fn guess_field_type(s: &str) -> FieldValue {
    if s.is_empty() || s == "NA" {
        return FieldValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return FieldValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return FieldValue::Float(f);
    }
    match s {
        "true" | "TRUE" | "True" => FieldValue::Bool(true),
        "false" | "FALSE" | "False" => FieldValue::Bool(false),
        _ => FieldValue::String(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<PlayTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        objects.push(obj);
    }
    if !objects.is_empty() {
        check_required(objects.iter().flat_map(|o| o.keys().map(String::as_str)))?;
    }

    let plays = objects
        .into_iter()
        .map(|obj| {
            PlayRecord::from_cells(|name| obj.get(name).map_or(FieldValue::Null, json_to_field))
        })
        .collect();

    Ok(PlayTable::new(plays))
}

fn json_to_field(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::String(other.to_string()),
    }
}
