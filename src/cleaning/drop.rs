//! Column dropping and duplicate-row removal.

use std::collections::HashSet;

use crate::column::owned_row_key;
use crate::error::{DataPrepError, DataPrepResult};
use crate::types::{DataSet, Schema};

/// Returns a new dataset with the named columns removed.
///
/// Every name must exist: a typo'd column is a caller bug, so the whole call
/// fails with [`DataPrepError::ColumnNotFound`] before anything is dropped,
/// rather than silently ignoring the stray name.
pub fn drop_columns(dataset: &DataSet, columns: &[&str]) -> DataPrepResult<DataSet> {
    let mut drop_idxs: HashSet<usize> = HashSet::new();
    for name in columns {
        match dataset.column_index(name) {
            Some(idx) => {
                drop_idxs.insert(idx);
            }
            None => return Err(DataPrepError::column_not_found(*name)),
        }
    }

    let fields = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(idx, _)| !drop_idxs.contains(idx))
        .map(|(_, f)| f.clone())
        .collect();

    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|(idx, _)| !drop_idxs.contains(idx))
                .map(|(_, v)| v.clone())
                .collect()
        })
        .collect();

    Ok(DataSet::new(Schema::new(fields), rows))
}

/// Returns a new dataset retaining only the first occurrence of each distinct
/// full row, preserving the relative order of kept rows.
///
/// Row equality compares every cell in column order; float cells compare by
/// bit pattern and `Null` equals `Null`.
pub fn remove_duplicates(dataset: &DataSet) -> DataSet {
    let mut seen = HashSet::new();
    dataset.filter_rows(|row| seen.insert(owned_row_key(row)))
}
