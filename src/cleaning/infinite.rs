//! Infinite-value handling for numeric columns.

use crate::types::{DataSet, Value};

/// Coordinates of a cell holding positive or negative infinity before
/// replacement. Rows are zero-based; the column is identified by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLocation {
    pub row: usize,
    pub column: String,
}

/// Outcome of [`handle_infinite_values`].
#[derive(Debug, Clone, PartialEq)]
pub struct InfiniteValueReport {
    /// The transformed dataset.
    pub dataset: DataSet,
    /// Where infinities were found, recorded before replacement. Empty unless
    /// `log_locations` was set.
    pub locations: Vec<CellLocation>,
    /// Columns where a cap could not be computed (no finite bound in that
    /// direction); the affected cells are left as infinity.
    pub warnings: Vec<String>,
}

/// Replaces positive/negative infinity cells in numeric columns.
///
/// - `convert_to_missing = true`: every infinity becomes the missing marker.
/// - `convert_to_missing = false`: `+inf` is capped at the column's finite
///   maximum and `-inf` at its finite minimum, computed with infinities
///   excluded. A column with no finite value in the needed direction keeps
///   its infinities and contributes a warning.
/// - `log_locations` records `(row, column)` coordinates of every infinity
///   found, without changing the transformation itself.
///
/// A dataset with no infinities comes back unchanged; that is an expected
/// state, not an error.
pub fn handle_infinite_values(
    dataset: &DataSet,
    convert_to_missing: bool,
    log_locations: bool,
) -> InfiniteValueReport {
    // Only numeric-typed columns participate; a stray infinity inside a
    // mistyped non-numeric column is left for convert_column to deal with.
    let numeric: Vec<bool> = dataset
        .schema
        .fields
        .iter()
        .map(|f| f.data_type.is_numeric())
        .collect();

    let mut locations = Vec::new();
    let mut any = false;
    for (row_idx, row) in dataset.rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if numeric[col_idx] && cell.is_infinite() {
                any = true;
                if log_locations {
                    locations.push(CellLocation {
                        row: row_idx,
                        column: dataset.schema.fields[col_idx].name.clone(),
                    });
                }
            }
        }
    }

    if !any {
        return InfiniteValueReport {
            dataset: dataset.clone(),
            locations,
            warnings: Vec::new(),
        };
    }

    let mut out = dataset.clone();
    let mut warnings = Vec::new();

    if convert_to_missing {
        for row in &mut out.rows {
            for (col_idx, cell) in row.iter_mut().enumerate() {
                if numeric[col_idx] && cell.is_infinite() {
                    *cell = Value::Null;
                }
            }
        }
        return InfiniteValueReport {
            dataset: out,
            locations,
            warnings,
        };
    }

    for idx in 0..out.column_count() {
        if !out.schema.fields[idx].data_type.is_numeric() {
            continue;
        }
        let has_pos = dataset
            .column_values(idx)
            .any(|v| matches!(v, Value::Float64(x) if *x == f64::INFINITY));
        let has_neg = dataset
            .column_values(idx)
            .any(|v| matches!(v, Value::Float64(x) if *x == f64::NEG_INFINITY));
        if !has_pos && !has_neg {
            continue;
        }

        let finite: Vec<f64> = dataset
            .column_values(idx)
            .filter_map(Value::as_f64)
            .filter(|v| v.is_finite())
            .collect();
        let finite_max = finite.iter().copied().reduce(f64::max);
        let finite_min = finite.iter().copied().reduce(f64::min);

        let name = &out.schema.fields[idx].name;
        if has_pos && finite_max.is_none() {
            warnings.push(format!(
                "column '{name}' has no finite maximum; +inf cells left as infinity"
            ));
        }
        if has_neg && finite_min.is_none() {
            warnings.push(format!(
                "column '{name}' has no finite minimum; -inf cells left as infinity"
            ));
        }

        for row in &mut out.rows {
            if let Value::Float64(x) = row[idx] {
                if x == f64::INFINITY {
                    if let Some(max) = finite_max {
                        row[idx] = Value::Float64(max);
                    }
                } else if x == f64::NEG_INFINITY {
                    if let Some(min) = finite_min {
                        row[idx] = Value::Float64(min);
                    }
                }
            }
        }
    }

    InfiniteValueReport {
        dataset: out,
        locations,
        warnings,
    }
}
