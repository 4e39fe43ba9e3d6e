//! Per-column EDA reports and dataset-level summaries.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::column;
use crate::types::{DataSet, DataType, Value};

/// Unique values above this cardinality are rendered as a sentinel string
/// instead of a full list.
const UNIQUE_LIST_LIMIT: usize = 10;

/// Sentinel rendering for high-cardinality unique-value lists.
const LOTS_OF_VALUES: &str = "Lots of categories or values";

/// Sentinel rendering when a column has no most-common value.
const NO_MODE: &str = "N/A";

/// Alert classification for a column report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnAlert {
    /// Missing ratio crossed the threshold. Takes precedence over
    /// [`ColumnAlert::ImbalancedData`] when both apply.
    LotsOfMissingItems,
    /// One value dominates the non-missing rows.
    ImbalancedData,
    /// Neither threshold crossed.
    LooksFine,
}

impl fmt::Display for ColumnAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ColumnAlert::LotsOfMissingItems => "lots of missing items",
            ColumnAlert::ImbalancedData => "imbalanced data",
            ColumnAlert::LooksFine => "looks fine",
        };
        f.write_str(text)
    }
}

/// Thresholds for [`generate_column_info`] alerts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertThresholds {
    /// Missing ratio (of total rows) above which a column is flagged.
    pub missing: f64,
    /// Dominant-value ratio (of non-missing rows) above which a column is
    /// flagged as imbalanced.
    pub balance: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            missing: 0.25,
            balance: 0.5,
        }
    }
}

/// Descriptive report for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnReport {
    /// Column name.
    pub name: String,
    /// Declared type.
    pub data_type: DataType,
    /// Count of missing cells.
    pub missing_count: usize,
    /// Missing cells as a percentage of total rows.
    pub missing_percent: f64,
    /// Count of distinct non-missing values.
    pub unique_count: usize,
    /// Rendered unique-value list, or a sentinel above
    /// [`UNIQUE_LIST_LIMIT`] distinct values.
    pub unique_values: String,
    /// Rendered most frequent non-missing value, or `"N/A"` when undefined.
    pub most_common: String,
    /// Alert classification.
    pub alert: ColumnAlert,
}

/// Builds one [`ColumnReport`] per column, in dataset order.
///
/// The missing-ratio check runs first; only then is the dominant-value ratio
/// considered. A column with no non-missing values cannot be imbalanced and
/// reports `LooksFine` unless its missing ratio already fired (an empty
/// dataset has ratio 0 for every column).
pub fn generate_column_info(dataset: &DataSet, thresholds: &AlertThresholds) -> Vec<ColumnReport> {
    let rows = dataset.row_count();
    (0..dataset.column_count())
        .map(|idx| {
            let field = &dataset.schema.fields[idx];
            let missing_count = rows - column::non_null_count(dataset, idx);
            let missing_ratio = if rows == 0 {
                0.0
            } else {
                missing_count as f64 / rows as f64
            };
            let unique = column::unique_values(dataset, idx);
            let mode = column::mode(dataset, idx);

            let unique_values = if unique.len() > UNIQUE_LIST_LIMIT {
                LOTS_OF_VALUES.to_string()
            } else {
                let rendered: Vec<String> = unique.iter().map(|v| v.render()).collect();
                format!("[{}]", rendered.join(", "))
            };

            let alert = classify(dataset, idx, missing_ratio, mode.as_ref(), thresholds);

            ColumnReport {
                name: field.name.clone(),
                data_type: field.data_type,
                missing_count,
                missing_percent: missing_ratio * 100.0,
                unique_count: unique.len(),
                unique_values,
                most_common: mode.map(|v| v.render()).unwrap_or_else(|| NO_MODE.to_string()),
                alert,
            }
        })
        .collect()
}

fn classify(
    dataset: &DataSet,
    idx: usize,
    missing_ratio: f64,
    mode: Option<&Value>,
    thresholds: &AlertThresholds,
) -> ColumnAlert {
    if missing_ratio > thresholds.missing {
        return ColumnAlert::LotsOfMissingItems;
    }
    let non_missing = column::non_null_count(dataset, idx);
    if let Some(mode) = mode {
        let mode_count = dataset
            .column_values(idx)
            .filter(|v| v.key() == mode.key())
            .count();
        if non_missing > 0 && mode_count as f64 / non_missing as f64 > thresholds.balance {
            return ColumnAlert::ImbalancedData;
        }
    }
    ColumnAlert::LooksFine
}

/// Dataset-level summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Row count.
    pub rows: usize,
    /// Column count.
    pub columns: usize,
    /// Total missing cells across all columns.
    pub total_missing: usize,
    /// Missing cells as a percentage of total cells, rounded to 2 decimals.
    /// Defined as 0.0 for a zero-cell dataset.
    pub missing_percent: f64,
    /// Count of rows that duplicate an earlier full row.
    pub duplicate_rows: usize,
    /// Count of numeric (int/float) columns.
    pub numeric_columns: usize,
    /// Count of text/categorical columns.
    pub categorical_columns: usize,
    /// Remaining columns (bool, datetime).
    pub other_columns: usize,
    /// Approximate in-memory footprint in bytes.
    pub approx_memory_bytes: usize,
}

/// Computes a [`DatasetSummary`] for the dataset.
pub fn summarize_dataset(dataset: &DataSet) -> DatasetSummary {
    let rows = dataset.row_count();
    let columns = dataset.column_count();
    let total_cells = rows * columns;

    let total_missing = dataset
        .rows
        .iter()
        .flat_map(|row| row.iter())
        .filter(|v| v.is_null())
        .count();
    let missing_percent = if total_cells == 0 {
        0.0
    } else {
        round2(100.0 * total_missing as f64 / total_cells as f64)
    };

    let mut seen = HashSet::new();
    let duplicate_rows = dataset
        .rows
        .iter()
        .filter(|row| !seen.insert(column::owned_row_key(row)))
        .count();

    let numeric_columns = dataset
        .schema
        .fields
        .iter()
        .filter(|f| f.data_type.is_numeric())
        .count();
    let categorical_columns = dataset
        .schema
        .fields
        .iter()
        .filter(|f| f.data_type == DataType::Utf8)
        .count();

    DatasetSummary {
        rows,
        columns,
        total_missing,
        missing_percent,
        duplicate_rows,
        numeric_columns,
        categorical_columns,
        other_columns: columns - numeric_columns - categorical_columns,
        approx_memory_bytes: dataset.approx_memory_bytes(),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
