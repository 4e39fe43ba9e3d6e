#![cfg(feature = "excel")]

//! Excel ingestion (feature `excel`).

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::cleaning::convert::{parse_bool, parse_datetime_ms};
use crate::error::{DataPrepError, DataPrepResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Days between the Excel serial-date epoch (1899-12-30) and the Unix epoch.
const EXCEL_UNIX_EPOCH_DAYS: f64 = 25_569.0;

/// Ingest one sheet of an Excel document (`.xlsx`, `.xls`, `.ods`) into an
/// in-memory [`DataSet`].
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet
/// - Detects the first non-empty row as the header row
/// - Validates that all schema fields exist as headers (order can differ)
/// - Reads remaining rows and converts cells into typed [`Value`]s; empty
///   cells become [`Value::Null`]
pub fn read_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    schema: &Schema,
) -> DataPrepResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DataPrepError::SchemaMismatch {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    let rows = read_sheet_range(&sheet, &range, schema)?;
    Ok(DataSet::new(schema.clone(), rows))
}

fn read_sheet_range(
    sheet: &str,
    range: &calamine::Range<Data>,
    schema: &Schema,
) -> DataPrepResult<Vec<Vec<Value>>> {
    let (header_row_idx, col_idxs) = header_projection(range, schema).map_err(|e| match e {
        DataPrepError::SchemaMismatch { message } => DataPrepError::SchemaMismatch {
            message: format!("sheet '{sheet}': {message}"),
        },
        other => other,
    })?;

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (idx0, row) in range.rows().enumerate() {
        if idx0 <= header_row_idx {
            continue;
        }

        // Report 1-based row number (Excel-like).
        let user_row = idx0 + 1;

        let mut out_row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &col_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let cell = row.get(col_idx).unwrap_or(&Data::Empty);
            out_row.push(convert_cell(user_row, &field.name, field.data_type, cell)?);
        }
        rows.push(out_row);
    }

    Ok(rows)
}

/// Finds the header row and maps schema fields to sheet column indexes.
fn header_projection(
    range: &calamine::Range<Data>,
    schema: &Schema,
) -> DataPrepResult<(usize, Vec<usize>)> {
    let header = range
        .rows()
        .enumerate()
        .find(|(_, row)| row.iter().any(|c| !matches!(c, Data::Empty)));
    let Some((header_row_idx, header_row)) = header else {
        return Err(DataPrepError::SchemaMismatch {
            message: "sheet has no non-empty rows (no header row found)".to_string(),
        });
    };
    let header_cells: Vec<String> = header_row.iter().map(|c| c.to_string()).collect();

    let mut col_idxs: Vec<usize> = Vec::with_capacity(schema.fields.len());
    for f in &schema.fields {
        match header_cells.iter().position(|h| h.trim() == f.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(DataPrepError::SchemaMismatch {
                    message: format!(
                        "missing required column '{}'. headers={:?}",
                        f.name, header_cells
                    ),
                });
            }
        }
    }

    Ok((header_row_idx, col_idxs))
}

fn convert_cell(row: usize, column: &str, data_type: DataType, c: &Data) -> DataPrepResult<Value> {
    if matches!(c, Data::Empty) {
        return Ok(Value::Null);
    }

    let parse_error = |raw: String, message: String| DataPrepError::ParseError {
        row,
        column: column.to_string(),
        raw,
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(match c {
            Data::String(s) => s.clone(),
            _ => c.to_string(),
        })),
        DataType::Bool => match c {
            Data::Bool(b) => Ok(Value::Bool(*b)),
            Data::Int(i) => Ok(Value::Bool(*i != 0)),
            Data::Float(f) => Ok(Value::Bool(*f != 0.0)),
            Data::String(s) => parse_bool(s.trim())
                .map(Value::Bool)
                .map_err(|m| parse_error(s.clone(), m)),
            _ => Err(parse_error(c.to_string(), "expected bool".to_string())),
        },
        DataType::Int64 => match c {
            Data::Int(i) => Ok(Value::Int64(*i)),
            Data::Float(f) if f.fract() == 0.0 => Ok(Value::Int64(*f as i64)),
            Data::Float(_) => Err(parse_error(
                c.to_string(),
                "expected integer (got non-integer float)".to_string(),
            )),
            Data::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int64)
                .map_err(|e| parse_error(s.clone(), e.to_string())),
            _ => Err(parse_error(c.to_string(), "expected integer".to_string())),
        },
        DataType::Float64 => match c {
            Data::Float(f) => Ok(Value::Float64(*f)),
            Data::Int(i) => Ok(Value::Float64(*i as f64)),
            Data::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float64)
                .map_err(|e| parse_error(s.clone(), e.to_string())),
            _ => Err(parse_error(c.to_string(), "expected number".to_string())),
        },
        DataType::Datetime => match c {
            // Serial dates count days from 1899-12-30 with a fractional
            // time-of-day part.
            Data::DateTime(dt) => Ok(Value::Datetime(
                ((dt.as_f64() - EXCEL_UNIX_EPOCH_DAYS) * 86_400_000.0).round() as i64,
            )),
            Data::DateTimeIso(s) | Data::String(s) => parse_datetime_ms(s.trim())
                .map(Value::Datetime)
                .map_err(|m| parse_error(s.clone(), m)),
            Data::Int(ms) => Ok(Value::Datetime(*ms)),
            _ => Err(parse_error(c.to_string(), "expected datetime".to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType, Range};

    use crate::types::Field;

    fn serial(days: f64) -> Data {
        Data::DateTime(ExcelDateTime::new(days, ExcelDateTimeType::DateTime, false))
    }

    #[test]
    fn empty_cells_convert_to_missing() {
        let cell = convert_cell(2, "x", DataType::Float64, &Data::Empty).unwrap();
        assert_eq!(cell, Value::Null);
    }

    #[test]
    fn serial_dates_convert_to_epoch_milliseconds() {
        // 1970-01-02 12:00 UTC is serial day 25570.5.
        let cell = convert_cell(2, "when", DataType::Datetime, &serial(25_570.5)).unwrap();
        assert_eq!(cell, Value::Datetime(86_400_000 + 43_200_000));
        // Serial day 25569 is the Unix epoch itself.
        let epoch = convert_cell(2, "when", DataType::Datetime, &serial(25_569.0)).unwrap();
        assert_eq!(epoch, Value::Datetime(0));
    }

    #[test]
    fn datetime_accepts_strings_and_epoch_millis() {
        let from_str = convert_cell(
            2,
            "when",
            DataType::Datetime,
            &Data::String("1970-01-02".to_string()),
        )
        .unwrap();
        assert_eq!(from_str, Value::Datetime(86_400_000));

        let from_int = convert_cell(2, "when", DataType::Datetime, &Data::Int(123)).unwrap();
        assert_eq!(from_int, Value::Datetime(123));
    }

    #[test]
    fn numeric_cells_cross_convert_and_strings_parse() {
        let widened = convert_cell(2, "x", DataType::Float64, &Data::Int(3)).unwrap();
        assert_eq!(widened, Value::Float64(3.0));

        let whole = convert_cell(2, "x", DataType::Int64, &Data::Float(4.0)).unwrap();
        assert_eq!(whole, Value::Int64(4));

        let parsed = convert_cell(2, "x", DataType::Int64, &Data::String(" 7 ".to_string()))
            .unwrap();
        assert_eq!(parsed, Value::Int64(7));

        let truthy = convert_cell(2, "x", DataType::Bool, &Data::String("yes".to_string()))
            .unwrap();
        assert_eq!(truthy, Value::Bool(true));
    }

    #[test]
    fn fractional_floats_do_not_convert_to_integers() {
        let err = convert_cell(3, "x", DataType::Int64, &Data::Float(4.5)).unwrap_err();
        match err {
            DataPrepError::ParseError { row, column, .. } => {
                assert_eq!(row, 3);
                assert_eq!(column, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("score", DataType::Float64),
        ])
    }

    #[test]
    fn header_projection_skips_leading_blank_rows_and_reorders() {
        // Row 0 is entirely empty; row 1 carries the headers, reordered
        // relative to the schema.
        let mut range: Range<Data> = Range::new((0, 0), (2, 1));
        range.set_value((1, 0), Data::String("score".to_string()));
        range.set_value((1, 1), Data::String("id".to_string()));
        range.set_value((2, 0), Data::Float(9.5));
        range.set_value((2, 1), Data::Int(1));

        let (header_row_idx, col_idxs) = header_projection(&range, &schema()).unwrap();
        assert_eq!(header_row_idx, 1);
        assert_eq!(col_idxs, vec![1, 0]);

        let rows = read_sheet_range("s", &range, &schema()).unwrap();
        assert_eq!(rows, vec![vec![Value::Int64(1), Value::Float64(9.5)]]);
    }

    #[test]
    fn missing_header_is_a_schema_mismatch_naming_the_sheet() {
        let mut range: Range<Data> = Range::new((0, 0), (1, 0));
        range.set_value((0, 0), Data::String("id".to_string()));
        range.set_value((1, 0), Data::Int(1));

        let err = read_sheet_range("grades", &range, &schema()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("sheet 'grades'"));
        assert!(msg.contains("missing required column 'score'"));
    }

    #[test]
    fn all_empty_sheet_reports_no_header_row() {
        let range: Range<Data> = Range::new((0, 0), (1, 1));
        let err = header_projection(&range, &schema()).unwrap_err();
        assert!(matches!(err, DataPrepError::SchemaMismatch { .. }));
    }
}
