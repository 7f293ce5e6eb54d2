use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array, Int8Array,
    StringArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

/// Column holding the launch site name.
pub const SITE_COLUMN: &str = "Launch Site";
/// Column holding the payload mass in kilograms.
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
/// Column holding the 0/1 outcome class.
pub const CLASS_COLUMN: &str = "class";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while loading launch records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("reading record batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing '{0}' column")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid '{column}' value {value:?}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("dataset contains no launch records")]
    Empty,
}

type Result<T> = std::result::Result<T, LoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load launch records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Launch Site`, `Payload Mass (kg)`, `class`
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., "class": ... }, ...]`
/// * `.parquet` – the same three columns, any numeric type for mass and class
///
/// Extra columns are ignored in every format.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    LaunchDataset::new(records)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        records.push(LaunchRecord::new(
            parse_site(field(site_idx), row)?,
            parse_payload(field(payload_idx), row)?,
            parse_class(field(class_idx), row)?,
        ));
    }

    Ok(records)
}

fn parse_site(s: &str, row: usize) -> Result<String> {
    if s.is_empty() {
        return Err(invalid(row, SITE_COLUMN, s));
    }
    Ok(s.to_string())
}

fn parse_payload(s: &str, row: usize) -> Result<f64> {
    s.parse::<f64>()
        .ok()
        .and_then(|v| check_payload(v, row).ok())
        .ok_or_else(|| invalid(row, PAYLOAD_COLUMN, s))
}

fn check_payload(v: f64, row: usize) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(invalid(row, PAYLOAD_COLUMN, v))
    }
}

fn parse_class(s: &str, row: usize) -> Result<Outcome> {
    let outcome = match s.parse::<i64>() {
        Ok(i) => Outcome::from_class(i),
        Err(_) => s.parse::<f64>().ok().and_then(Outcome::from_class_f64),
    };
    outcome.ok_or_else(|| invalid(row, CLASS_COLUMN, s))
}

fn invalid(row: usize, column: &'static str, value: impl ToString) -> LoadError {
    LoadError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One object of a records-oriented JSON export (`df.to_json(orient='records')`).
#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    class: f64,
}

fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<JsonRecord> = serde_json::from_str(&text)?;

    rows.into_iter()
        .enumerate()
        .map(|(row, r)| {
            let outcome =
                Outcome::from_class_f64(r.class).ok_or_else(|| invalid(row, CLASS_COLUMN, r.class))?;
            Ok(LaunchRecord::new(
                parse_site(r.site.trim(), row)?,
                check_payload(r.payload_mass_kg, row)?,
                outcome,
            ))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the three launch columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): the site may be Utf8 or LargeUtf8, mass
/// and class any integer or float type.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let column = |name: &'static str| {
            schema
                .index_of(name)
                .map(|idx| batch.column(idx))
                .map_err(|_| LoadError::MissingColumn(name))
        };
        let site_col = column(SITE_COLUMN)?;
        let payload_col = column(PAYLOAD_COLUMN)?;
        let class_col = column(CLASS_COLUMN)?;

        for i in 0..batch.num_rows() {
            let row = records.len();

            let site = extract_string(site_col, i)
                .ok_or_else(|| invalid(row, SITE_COLUMN, format!("{:?}", site_col.data_type())))?;
            let payload = extract_f64(payload_col, i)
                .ok_or_else(|| invalid(row, PAYLOAD_COLUMN, "null"))?;
            let class = extract_f64(class_col, i)
                .ok_or_else(|| invalid(row, CLASS_COLUMN, "null"))?;
            let outcome =
                Outcome::from_class_f64(class).ok_or_else(|| invalid(row, CLASS_COLUMN, class))?;

            records.push(LaunchRecord::new(
                parse_site(site.trim(), row)?,
                check_payload(payload, row)?,
                outcome,
            ));
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Read a string cell from a Utf8 or LargeUtf8 column.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

/// Read a numeric cell of any integer or float type as `f64`.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    macro_rules! cell {
        ($ty:ty) => {
            any.downcast_ref::<$ty>().map(|a| a.value(row) as f64)
        };
    }
    match col.data_type() {
        DataType::Float64 => cell!(Float64Array),
        DataType::Float32 => cell!(Float32Array),
        DataType::Int64 => cell!(Int64Array),
        DataType::Int32 => cell!(Int32Array),
        DataType::Int16 => cell!(Int16Array),
        DataType::Int8 => cell!(Int8Array),
        DataType::UInt64 => cell!(UInt64Array),
        DataType::UInt32 => cell!(UInt32Array),
        DataType::UInt16 => cell!(UInt16Array),
        DataType::UInt8 => cell!(UInt8Array),
        _ => None,
    }
}
