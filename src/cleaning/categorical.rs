//! Categorical-suitability classification.

use crate::column;
use crate::error::{DataPrepError, DataPrepResult};
use crate::types::DataSet;

/// Cardinality thresholds for [`is_suitable_categorical`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoricalThresholds {
    /// A numeric column qualifies when unique count / non-missing count is at
    /// or below this ratio.
    pub max_unique_ratio: f64,
    /// A numeric column qualifies when its unique count is at or below this.
    pub max_unique_count: usize,
}

impl Default for CategoricalThresholds {
    fn default() -> Self {
        Self {
            max_unique_ratio: 0.05,
            max_unique_count: 20,
        }
    }
}

/// Whether a column is suitable for categorical (grouping-like) analysis.
///
/// - A column with no non-missing values is never suitable.
/// - Any non-numeric column is always suitable.
/// - A numeric column is suitable iff its unique count is at most
///   `max_unique_count` or its unique ratio is at most `max_unique_ratio`.
///
/// Fails with [`DataPrepError::ColumnNotFound`] for an unknown column.
pub fn is_suitable_categorical(
    dataset: &DataSet,
    column: &str,
    thresholds: &CategoricalThresholds,
) -> DataPrepResult<bool> {
    let idx = dataset
        .column_index(column)
        .ok_or_else(|| DataPrepError::column_not_found(column))?;
    Ok(suitable_at(dataset, idx, thresholds))
}

/// Column names suitable for categorical analysis under default thresholds,
/// in dataset order, minus any name in `exclude`.
pub fn get_categorical_columns(dataset: &DataSet, exclude: &[&str]) -> Vec<String> {
    let thresholds = CategoricalThresholds::default();
    dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(_, f)| !exclude.contains(&f.name.as_str()))
        .filter(|(idx, _)| suitable_at(dataset, *idx, &thresholds))
        .map(|(_, f)| f.name.clone())
        .collect()
}

fn suitable_at(dataset: &DataSet, idx: usize, thresholds: &CategoricalThresholds) -> bool {
    let non_missing = column::non_null_count(dataset, idx);
    if non_missing == 0 {
        return false;
    }
    if !dataset.schema.fields[idx].data_type.is_numeric() {
        return true;
    }

    let uniques = column::unique_count(dataset, idx);
    let ratio = uniques as f64 / non_missing as f64;
    uniques <= thresholds.max_unique_count || ratio <= thresholds.max_unique_ratio
}
