//! Dataset-level cleanup ahead of analysis.

use crate::cleaning::names::uniquify_names;
use crate::column;
use crate::types::{DataSet, Schema, Value};

/// Drops columns that are entirely missing; when `target` names a present
/// column, additionally drops rows where the target is missing.
///
/// A `target` absent from the dataset is silently ignored. That is by
/// contract: the target is optional and may have been dropped by an earlier
/// cleaning step.
pub fn prepare_for_analysis(dataset: &DataSet, target: Option<&str>) -> DataSet {
    let out = drop_all_missing_columns(dataset);
    match target.and_then(|t| out.column_index(t)) {
        Some(idx) => out.filter_rows(|row| !row[idx].is_null()),
        None => out,
    }
}

/// Drops rows that are entirely missing, then columns that are entirely
/// missing, then renames any remaining duplicate column names so names are
/// unique (first occurrence keeps the bare name).
pub fn clean_comprehensive(dataset: &DataSet) -> DataSet {
    let kept_rows = dataset.filter_rows(|row| row.iter().any(|v| !v.is_null()));
    let mut out = drop_all_missing_columns(&kept_rows);

    let names: Vec<String> = out.schema.field_names().map(str::to_string).collect();
    let unique = uniquify_names(&names);
    for (field, name) in out.schema.fields.iter_mut().zip(unique) {
        field.name = name;
    }
    out
}

fn drop_all_missing_columns(dataset: &DataSet) -> DataSet {
    let keep: Vec<usize> = (0..dataset.column_count())
        .filter(|&idx| column::non_null_count(dataset, idx) > 0)
        .collect();

    let fields = keep
        .iter()
        .map(|&idx| dataset.schema.fields[idx].clone())
        .collect();
    let rows = dataset
        .rows
        .iter()
        .map(|row| keep.iter().map(|&idx| row[idx].clone()).collect())
        .collect();
    DataSet::new(Schema::new(fields), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field};

    fn sparse() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("a", DataType::Int64),
            Field::new("empty", DataType::Float64),
            Field::new("target", DataType::Float64),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Null, Value::Float64(0.5)],
                vec![Value::Int64(2), Value::Null, Value::Null],
                vec![Value::Null, Value::Null, Value::Null],
            ],
        )
    }

    #[test]
    fn prepare_drops_all_missing_columns() {
        let out = prepare_for_analysis(&sparse(), None);
        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["a", "target"]
        );
        assert_eq!(out.row_count(), 3);
    }

    #[test]
    fn prepare_drops_rows_missing_the_target() {
        let out = prepare_for_analysis(&sparse(), Some("target"));
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.rows[0][0], Value::Int64(1));
    }

    #[test]
    fn prepare_ignores_absent_target() {
        let out = prepare_for_analysis(&sparse(), Some("not_here"));
        assert_eq!(out.row_count(), 3);
    }

    #[test]
    fn comprehensive_drops_empty_rows_then_empty_columns() {
        let out = clean_comprehensive(&sparse());
        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["a", "target"]
        );
        // The all-missing third row is gone.
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn comprehensive_renames_duplicate_columns() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Int64),
            Field::new("x", DataType::Float64),
            Field::new("x", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![vec![
                Value::Int64(1),
                Value::Float64(2.0),
                Value::Utf8("three".to_string()),
            ]],
        );
        let out = clean_comprehensive(&ds);
        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["x", "x_1", "x_2"]
        );
    }
}
