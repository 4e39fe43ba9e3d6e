//! JSON ingestion.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Nested fields are supported using dot paths in schema field names (e.g.
//! `user.name`). A field absent from an object reads as [`Value::Null`], the
//! same way an empty CSV cell does: sparse records are data to clean, not a
//! structural error.

use std::fs;
use std::path::Path;

use crate::cleaning::convert::parse_datetime_ms;
use crate::error::{DataPrepError, DataPrepResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Ingest JSON from a file into an in-memory [`DataSet`].
pub fn read_json_from_path(path: impl AsRef<Path>, schema: &Schema) -> DataPrepResult<DataSet> {
    let text = fs::read_to_string(path)?;
    read_json_from_str(&text, schema)
}

/// Ingest JSON from an in-memory string into a [`DataSet`].
pub fn read_json_from_str(input: &str, schema: &Schema) -> DataPrepResult<DataSet> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DataPrepError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // A single JSON value first (array or object), NDJSON as the fallback.
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => rows_from_objects(&items, schema),
            serde_json::Value::Object(_) => rows_from_objects(std::slice::from_ref(&v), schema),
            _ => Err(DataPrepError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                DataPrepError::SchemaMismatch {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            values.push(v);
        }
        rows_from_objects(&values, schema)
    }
}

fn rows_from_objects(values: &[serde_json::Value], schema: &Schema) -> DataPrepResult<DataSet> {
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(values.len());

    for (idx0, v) in values.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = v.as_object().ok_or_else(|| DataPrepError::SchemaMismatch {
            message: format!("row {row_num} is not a json object"),
        })?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let cell = match get_by_dot_path(obj, &field.name) {
                Some(jv) => convert_json_value(row_num, &field.name, field.data_type, jv)?,
                None => Value::Null,
            };
            row.push(cell);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn get_by_dot_path<'a>(
    root: &'a serde_json::Map<String, serde_json::Value>,
    path: &str,
) -> Option<&'a serde_json::Value> {
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        match current {
            serde_json::Value::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}

fn convert_json_value(
    row: usize,
    column: &str,
    data_type: DataType,
    v: &serde_json::Value,
) -> DataPrepResult<Value> {
    if v.is_null() {
        return Ok(Value::Null);
    }

    let parse_error = |message: &str| DataPrepError::ParseError {
        row,
        column: column.to_string(),
        raw: v.to_string(),
        message: message.to_string(),
    };

    match data_type {
        DataType::Utf8 => v
            .as_str()
            .map(|s| Value::Utf8(s.to_string()))
            .ok_or_else(|| parse_error("expected string")),
        DataType::Bool => v
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| parse_error("expected bool")),
        DataType::Int64 => v
            .as_i64()
            .map(Value::Int64)
            .ok_or_else(|| parse_error("expected integer number")),
        DataType::Float64 => v
            .as_f64()
            .map(Value::Float64)
            .ok_or_else(|| parse_error("expected number")),
        // Either epoch milliseconds or a datetime string.
        DataType::Datetime => {
            if let Some(ms) = v.as_i64() {
                Ok(Value::Datetime(ms))
            } else if let Some(s) = v.as_str() {
                parse_datetime_ms(s)
                    .map(Value::Datetime)
                    .map_err(|message| parse_error(&message))
            } else {
                Err(parse_error("expected datetime string or epoch milliseconds"))
            }
        }
    }
}
