//! CSV export to JSONL input conversion.
//!
//! Pure reshaping: each CSV row becomes one JSON object keyed by the header
//! names. Cell values are typed the way a dataframe export would type them.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::ReaderBuilder;
use serde_json::{Map, Number, Value};
use tracing::info;

use crate::error::{IngestError, Result};

/// Converts a CSV file into a JSONL file, returning the number of records.
pub fn convert_csv_to_jsonl(csv_path: &Path, jsonl_path: &Path) -> Result<usize> {
    let input = File::open(csv_path).map_err(|err| IngestError::open(csv_path, err))?;
    let output = File::create(jsonl_path).map_err(|source| IngestError::FileWrite {
        path: jsonl_path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(output);
    let records = write_jsonl_from_csv(input, &mut writer)?;
    writer.flush().map_err(|source| IngestError::FileWrite {
        path: jsonl_path.to_path_buf(),
        source,
    })?;
    info!(
        input = %csv_path.display(),
        output = %jsonl_path.display(),
        records,
        "converted CSV to JSONL"
    );
    Ok(records)
}

/// Streams CSV rows from `reader` as JSON lines into `writer`.
pub fn write_jsonl_from_csv<R: Read, W: Write>(reader: R, mut writer: W) -> Result<usize> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut count = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        let mut object = Map::new();
        for (idx, cell) in record.iter().enumerate() {
            let Some(key) = headers.get(idx) else {
                continue;
            };
            object.insert(key.clone(), csv_cell_value(cell));
        }
        serde_json::to_writer(&mut writer, &Value::Object(object)).map_err(|source| {
            IngestError::Serialize {
                row: count + 1,
                source,
            }
        })?;
        writer.write_all(b"\n").map_err(IngestError::Output)?;
        count += 1;
    }
    Ok(count)
}

/// Types one CSV cell: empty is `null`, integers and finite floats are
/// numbers, `true`/`false` are booleans, everything else is a string.
pub fn csv_cell_value(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    if let Some(number) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(cell.to_string()),
    }
}
