//! CSV/TSV loading with delimiter detection and value coercion.

use std::fs;
use std::path::Path;

use normalyze::{Dataset, Row};
use serde_json::Value;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Cell tokens treated as missing values.
const NULL_TOKENS: &[&str] = &["", "na", "n/a", "null", "none", "nil", ".", "-"];

/// Load a delimited file into a dataset.
///
/// The delimiter is auto-detected from the header line; cells are coerced to
/// integers, floats, or booleans where they parse cleanly, and null tokens
/// become JSON null.
pub fn load_dataset(path: &Path) -> Result<Dataset, Box<dyn std::error::Error>> {
    let contents = fs::read(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let delimiter = detect_delimiter(&contents);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(contents.as_slice());

    let attributes: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

    let mut rows: Vec<Row> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = attributes
            .iter()
            .enumerate()
            .map(|(i, attr)| (attr.clone(), coerce_value(record.get(i).unwrap_or(""))))
            .collect();
        rows.push(row);
    }

    Ok(Dataset::new(attributes, rows)?)
}

/// Pick the delimiter that splits the header line into the most fields.
fn detect_delimiter(contents: &[u8]) -> u8 {
    let header = contents.split(|&b| b == b'\n').next().unwrap_or(&[]);
    DELIMITERS
        .iter()
        .copied()
        .max_by_key(|&d| header.iter().filter(|&&b| b == d).count())
        .unwrap_or(b',')
}

/// Coerce a raw cell into a typed JSON value.
fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if NULL_TOKENS.contains(&trimmed.to_lowercase().as_str()) {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::from(f);
    }
    match trimmed.to_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(trimmed.to_string()),
    }
}
