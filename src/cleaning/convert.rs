//! Explicit column type conversion.

use chrono::{DateTime, NaiveDate};

use crate::error::{DataPrepError, DataPrepResult};
use crate::types::{DataSet, DataType, Value};

/// Returns a new dataset with one column cast to `target` type.
///
/// Missing cells stay missing. Each non-missing cell is converted; any cell
/// that cannot be represented in the target type fails the whole call with
/// [`DataPrepError::ParseError`] and leaves the caller's dataset untouched.
pub fn convert_column(
    dataset: &DataSet,
    column: &str,
    target: DataType,
) -> DataPrepResult<DataSet> {
    let idx = dataset
        .column_index(column)
        .ok_or_else(|| DataPrepError::column_not_found(column))?;

    let mut out = dataset.clone();
    out.schema.fields[idx].data_type = target;
    for (row_idx, row) in out.rows.iter_mut().enumerate() {
        let converted = convert_cell(&row[idx], target).map_err(|message| {
            DataPrepError::ParseError {
                row: row_idx + 1,
                column: column.to_string(),
                raw: row[idx].render(),
                message,
            }
        })?;
        row[idx] = converted;
    }
    Ok(out)
}

fn convert_cell(value: &Value, target: DataType) -> Result<Value, String> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    match target {
        DataType::Utf8 => Ok(Value::Utf8(value.render())),
        DataType::Int64 => match value {
            Value::Int64(v) => Ok(Value::Int64(*v)),
            Value::Float64(v) if v.is_finite() => Ok(Value::Int64(*v as i64)),
            Value::Float64(_) => Err("cannot convert non-finite float to integer".to_string()),
            Value::Bool(v) => Ok(Value::Int64(i64::from(*v))),
            Value::Utf8(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int64)
                .map_err(|e| e.to_string()),
            Value::Datetime(ms) => Ok(Value::Int64(*ms)),
            Value::Null => unreachable!("null handled above"),
        },
        DataType::Float64 => match value {
            Value::Int64(v) => Ok(Value::Float64(*v as f64)),
            Value::Float64(v) => Ok(Value::Float64(*v)),
            Value::Bool(v) => Ok(Value::Float64(f64::from(u8::from(*v)))),
            Value::Utf8(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float64)
                .map_err(|e| e.to_string()),
            Value::Datetime(ms) => Ok(Value::Float64(*ms as f64)),
            Value::Null => unreachable!("null handled above"),
        },
        DataType::Bool => match value {
            Value::Bool(v) => Ok(Value::Bool(*v)),
            Value::Int64(v) => Ok(Value::Bool(*v != 0)),
            Value::Float64(v) => Ok(Value::Bool(*v != 0.0)),
            Value::Utf8(s) => parse_bool(s.trim()).map(Value::Bool),
            _ => Err("cannot convert to bool".to_string()),
        },
        DataType::Datetime => match value {
            Value::Datetime(ms) => Ok(Value::Datetime(*ms)),
            Value::Int64(ms) => Ok(Value::Datetime(*ms)),
            Value::Utf8(s) => parse_datetime_ms(s.trim()).map(Value::Datetime),
            _ => Err("cannot convert to datetime".to_string()),
        },
    }
}

pub(crate) fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date into epoch ms UTC.
pub(crate) fn parse_datetime_ms(s: &str) -> Result<i64, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| "invalid date".to_string())?;
        return Ok(dt.and_utc().timestamp_millis());
    }
    Err("expected RFC 3339 timestamp or YYYY-MM-DD date".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, Schema};

    fn text_column(values: &[&str]) -> DataSet {
        let schema = Schema::new(vec![Field::new("x", DataType::Utf8)]);
        DataSet::new(
            schema,
            values
                .iter()
                .map(|s| vec![Value::Utf8(s.to_string())])
                .collect(),
        )
    }

    #[test]
    fn converts_text_to_float() {
        let out = convert_column(&text_column(&["1.5", " 2 "]), "x", DataType::Float64).unwrap();
        assert_eq!(out.schema.fields[0].data_type, DataType::Float64);
        assert_eq!(out.rows[0][0], Value::Float64(1.5));
        assert_eq!(out.rows[1][0], Value::Float64(2.0));
    }

    #[test]
    fn preserves_missing_cells() {
        let schema = Schema::new(vec![Field::new("x", DataType::Int64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Null], vec![Value::Int64(3)]]);
        let out = convert_column(&ds, "x", DataType::Utf8).unwrap();
        assert_eq!(out.rows[0][0], Value::Null);
        assert_eq!(out.rows[1][0], Value::Utf8("3".to_string()));
    }

    #[test]
    fn bad_cell_fails_with_row_context() {
        let err = convert_column(&text_column(&["1", "oops"]), "x", DataType::Int64).unwrap_err();
        match err {
            DataPrepError::ParseError { row, column, raw, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "x");
                assert_eq!(raw, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_column_is_rejected() {
        assert!(matches!(
            convert_column(&text_column(&["1"]), "y", DataType::Int64),
            Err(DataPrepError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn parses_dates_and_timestamps() {
        assert_eq!(parse_datetime_ms("1970-01-01").unwrap(), 0);
        assert_eq!(parse_datetime_ms("1970-01-02").unwrap(), 86_400_000);
        assert_eq!(
            parse_datetime_ms("1970-01-01T00:00:01Z").unwrap(),
            1_000
        );
        assert!(parse_datetime_ms("not a date").is_err());
    }
}
