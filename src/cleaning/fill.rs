//! Missing-value imputation.

use serde::{Deserialize, Serialize};

use crate::column;
use crate::error::{DataPrepError, DataPrepResult};
use crate::types::{DataSet, DataType, Value};

/// Imputation strategy for [`fill_missing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FillMethod {
    /// Replace missing numeric cells with the column mean. Non-numeric
    /// columns pass through unchanged.
    Mean,
    /// Replace missing numeric cells with the column median. Non-numeric
    /// columns pass through unchanged.
    Median,
    /// Replace missing cells in every column with that column's most
    /// frequent non-missing value. A column with no mode is left unchanged.
    Mode,
    /// Replace each missing cell with the nearest preceding non-missing cell
    /// in row order. A leading run of missing cells stays missing.
    ForwardFill,
    /// Replace each missing cell with the nearest following non-missing cell
    /// in row order. A trailing run of missing cells stays missing.
    BackwardFill,
    /// Replace every missing cell, in every column, with one fixed value.
    /// The value is not coerced to the column's declared type.
    Custom(Value),
}

impl FillMethod {
    /// Parse a method token as accepted by the interactive layer.
    ///
    /// `custom` requires a fill value; every unknown token is
    /// [`DataPrepError::UnsupportedMethod`].
    pub fn parse(token: &str, custom_value: Option<Value>) -> DataPrepResult<Self> {
        match token {
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            "mode" => Ok(Self::Mode),
            "ffill" => Ok(Self::ForwardFill),
            "bfill" => Ok(Self::BackwardFill),
            "custom" => match custom_value {
                Some(v) => Ok(Self::Custom(v)),
                None => Err(DataPrepError::UnsupportedMethod {
                    method: "custom (no fill value supplied)".to_string(),
                }),
            },
            other => Err(DataPrepError::UnsupportedMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// Returns a new dataset with missing cells replaced per `method`.
///
/// Mean/median fills on an `Int64` column promote the column to `Float64`
/// (the computed statistic is generally fractional); all other strategies
/// preserve declared types. Columns whose statistic is undefined (no
/// non-missing values) are left unchanged.
pub fn fill_missing(dataset: &DataSet, method: &FillMethod) -> DataSet {
    match method {
        FillMethod::Mean => fill_numeric_statistic(dataset, mean),
        FillMethod::Median => fill_numeric_statistic(dataset, median),
        FillMethod::Mode => fill_with_mode(dataset),
        FillMethod::ForwardFill => fill_directional(dataset, Direction::Forward),
        FillMethod::BackwardFill => fill_directional(dataset, Direction::Backward),
        FillMethod::Custom(value) => dataset.map_rows(|row| {
            row.iter()
                .map(|v| if v.is_null() { value.clone() } else { v.clone() })
                .collect()
        }),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

fn fill_numeric_statistic(dataset: &DataSet, stat: fn(&[f64]) -> f64) -> DataSet {
    let mut out = dataset.clone();
    for idx in 0..out.column_count() {
        if !out.schema.fields[idx].data_type.is_numeric() {
            continue;
        }
        let values = column::numeric_values(dataset, idx);
        if values.is_empty() {
            continue;
        }
        let has_missing = dataset.column_values(idx).any(Value::is_null);
        if !has_missing {
            continue;
        }

        let fill = stat(&values);
        let promote = out.schema.fields[idx].data_type == DataType::Int64;
        if promote {
            out.schema.fields[idx].data_type = DataType::Float64;
        }
        for row in &mut out.rows {
            row[idx] = match &row[idx] {
                Value::Null => Value::Float64(fill),
                Value::Int64(v) if promote => Value::Float64(*v as f64),
                other => other.clone(),
            };
        }
    }
    out
}

fn fill_with_mode(dataset: &DataSet) -> DataSet {
    let mut out = dataset.clone();
    for idx in 0..out.column_count() {
        let Some(fill) = column::mode(dataset, idx) else {
            // No non-missing values means no mode; a deliberate no-op.
            continue;
        };
        for row in &mut out.rows {
            if row[idx].is_null() {
                row[idx] = fill.clone();
            }
        }
    }
    out
}

enum Direction {
    Forward,
    Backward,
}

fn fill_directional(dataset: &DataSet, direction: Direction) -> DataSet {
    let mut out = dataset.clone();
    for idx in 0..out.column_count() {
        let mut last: Option<Value> = None;
        let indices: Vec<usize> = match direction {
            Direction::Forward => (0..out.row_count()).collect(),
            Direction::Backward => (0..out.row_count()).rev().collect(),
        };
        for row_idx in indices {
            if out.rows[row_idx][idx].is_null() {
                if let Some(v) = &last {
                    out.rows[row_idx][idx] = v.clone();
                }
            } else {
                last = Some(out.rows[row_idx][idx].clone());
            }
        }
    }
    out
}
