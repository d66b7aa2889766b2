use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{ColumnPresence, Order, OrderDataset};

/// Recognized column names (case-sensitive). Anything else is ignored.
pub const COL_VALUE: &str = "Value";
pub const COL_SHIP_MODE: &str = "Ship_Mode";
pub const COL_SEGMENT: &str = "Segment";
pub const COL_CUSTOMER_ID: &str = "Customer_ID";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A fatal data-source failure. Absence of an *optional* column is not an
/// error; it is recorded in [`ColumnPresence`] instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: {message}")]
    Row { row: usize, message: String },
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("{0}")]
    Malformed(String),
}

impl LoadError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn row(row: usize, message: impl Into<String>) -> Self {
        LoadError::Row {
            row,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an order dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – delimited file with a header row (primary format)
/// * `.json`    – `[{ "Value": 12.5, "Ship_Mode": "...", ... }, ...]`
/// * `.parquet` – flat scalar columns
pub fn load_file(path: &Path) -> Result<OrderDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<OrderDataset, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let value_idx = headers
        .iter()
        .position(|h| h == COL_VALUE)
        .ok_or(LoadError::MissingColumn(COL_VALUE))?;
    let ship_idx = headers.iter().position(|h| h == COL_SHIP_MODE);
    let segment_idx = headers.iter().position(|h| h == COL_SEGMENT);
    let customer_idx = headers.iter().position(|h| h == COL_CUSTOMER_ID);

    let columns = ColumnPresence {
        ship_mode: ship_idx.is_some(),
        segment: segment_idx.is_some(),
        customer_id: customer_idx.is_some(),
    };

    let mut orders = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let raw = record.get(value_idx).unwrap_or("").trim();
        let value = raw.parse::<f64>().map_err(|_| {
            LoadError::row(row_no, format!("'{raw}' in column '{COL_VALUE}' is not a number"))
        })?;

        orders.push(Order {
            value,
            ship_mode: optional_cell(&record, ship_idx),
            segment: optional_cell(&record, segment_idx),
            customer_id: optional_cell(&record, customer_idx),
        });
    }

    Ok(OrderDataset::from_orders(orders, columns))
}

/// Empty cells in an optional column become `None`.
fn optional_cell(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Value": 261.96, "Ship_Mode": "Second Class",
///     "Segment": "Consumer", "Customer_ID": "CG-12520" },
///   ...
/// ]
/// ```
///
/// An optional column counts as present when any record carries the key.
fn load_json(path: &Path) -> Result<OrderDataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    let mut columns = ColumnPresence::default();
    let mut orders = Vec::with_capacity(records.len());

    for (row_no, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::row(row_no, "not a JSON object"))?;

        let value = obj
            .get(COL_VALUE)
            .ok_or(LoadError::MissingColumn(COL_VALUE))?
            .as_f64()
            .ok_or_else(|| LoadError::row(row_no, format!("'{COL_VALUE}' is not a number")))?;

        columns.ship_mode |= obj.contains_key(COL_SHIP_MODE);
        columns.segment |= obj.contains_key(COL_SEGMENT);
        columns.customer_id |= obj.contains_key(COL_CUSTOMER_ID);

        orders.push(Order {
            value,
            ship_mode: json_string(obj.get(COL_SHIP_MODE)),
            segment: json_string(obj.get(COL_SEGMENT)),
            customer_id: json_string(obj.get(COL_CUSTOMER_ID)),
        });
    }

    Ok(OrderDataset::from_orders(orders, columns))
}

fn json_string(val: Option<&JsonValue>) -> Option<String> {
    match val? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar columns.
///
/// Expected schema:
/// - `Value`: Float64 / Float32 / Int64 / Int32
/// - `Ship_Mode`, `Segment`, `Customer_ID`: optional Utf8 columns
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<OrderDataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    if schema.index_of(COL_VALUE).is_err() {
        return Err(LoadError::MissingColumn(COL_VALUE));
    }
    let columns = ColumnPresence {
        ship_mode: schema.index_of(COL_SHIP_MODE).is_ok(),
        segment: schema.index_of(COL_SEGMENT).is_ok(),
        customer_id: schema.index_of(COL_CUSTOMER_ID).is_ok(),
    };

    let mut orders = Vec::new();
    let mut row_base = 0usize;

    for batch_result in reader {
        let batch = batch_result?;
        let n_rows = batch.num_rows();

        let value_col = batch
            .column_by_name(COL_VALUE)
            .cloned()
            .ok_or(LoadError::MissingColumn(COL_VALUE))?;
        let ship_col = batch.column_by_name(COL_SHIP_MODE).cloned();
        let segment_col = batch.column_by_name(COL_SEGMENT).cloned();
        let customer_col = batch.column_by_name(COL_CUSTOMER_ID).cloned();

        for row in 0..n_rows {
            let value = scalar_f64(&value_col, row)
                .ok_or_else(|| LoadError::row(row_base + row, format!("unreadable '{COL_VALUE}' cell")))?;

            orders.push(Order {
                value,
                ship_mode: ship_col.as_ref().and_then(|c| scalar_string(c, row)),
                segment: segment_col.as_ref().and_then(|c| scalar_string(c, row)),
                customer_id: customer_col.as_ref().and_then(|c| scalar_string(c, row)),
            });
        }
        row_base += n_rows;
    }

    Ok(OrderDataset::from_orders(orders, columns))
}

// -- Parquet / Arrow helpers --

/// Extract a numeric scalar at the given row, widening integers to `f64`.
fn scalar_f64(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        _ => None,
    }
}

/// Extract an optional string scalar at the given row; nulls become `None`.
fn scalar_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|a| a.value(row).to_string()),
        _ => None,
    }
}
