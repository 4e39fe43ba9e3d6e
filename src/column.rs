//! Shared per-column helpers used by both the cleaning and analysis modules:
//! non-missing extraction, unique counting, and mode computation over a
//! hashable view of [`Value`].

use std::collections::HashMap;
use std::collections::HashSet;

use crate::types::{DataSet, Value};

/// Hashable, totally-ordered stand-in for [`Value`].
///
/// Floats compare by bit pattern, which is what row deduplication and unique
/// counting want: two cells holding the same stored bits are the same value,
/// and `Null` equals `Null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey<'a> {
    Null,
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(&'a str),
    Datetime(i64),
}

impl Value {
    /// Hashable view of the cell, borrowed for strings.
    pub fn key(&self) -> ValueKey<'_> {
        match self {
            Value::Null => ValueKey::Null,
            Value::Int64(v) => ValueKey::Int(*v),
            Value::Float64(v) => ValueKey::Float(v.to_bits()),
            Value::Bool(v) => ValueKey::Bool(*v),
            Value::Utf8(s) => ValueKey::Str(s.as_str()),
            Value::Datetime(ms) => ValueKey::Datetime(*ms),
        }
    }
}

/// Owned variant of [`ValueKey`], for seen-sets that outlive the row they
/// were built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnedValueKey {
    Null,
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(String),
    Datetime(i64),
}

impl ValueKey<'_> {
    /// Detach the key from its source row.
    pub fn into_owned(self) -> OwnedValueKey {
        match self {
            ValueKey::Null => OwnedValueKey::Null,
            ValueKey::Int(v) => OwnedValueKey::Int(v),
            ValueKey::Float(bits) => OwnedValueKey::Float(bits),
            ValueKey::Bool(v) => OwnedValueKey::Bool(v),
            ValueKey::Str(s) => OwnedValueKey::Str(s.to_string()),
            ValueKey::Datetime(ms) => OwnedValueKey::Datetime(ms),
        }
    }
}

/// Owned hashable view of a full row.
pub fn owned_row_key(row: &[Value]) -> Vec<OwnedValueKey> {
    row.iter().map(|v| v.key().into_owned()).collect()
}

/// Non-missing values of a column as `f64`, in row order.
///
/// `Int64` cells widen; non-numeric cells and `Null` are skipped.
pub fn numeric_values(dataset: &DataSet, idx: usize) -> Vec<f64> {
    dataset
        .column_values(idx)
        .filter_map(Value::as_f64)
        .collect()
}

/// Count of non-missing cells in a column.
pub fn non_null_count(dataset: &DataSet, idx: usize) -> usize {
    dataset.column_values(idx).filter(|v| !v.is_null()).count()
}

/// Count of distinct non-missing values in a column.
pub fn unique_count(dataset: &DataSet, idx: usize) -> usize {
    let mut seen: HashSet<ValueKey<'_>> = HashSet::new();
    for v in dataset.column_values(idx) {
        if !v.is_null() {
            seen.insert(v.key());
        }
    }
    seen.len()
}

/// Distinct non-missing values of a column, in first-seen order.
pub fn unique_values(dataset: &DataSet, idx: usize) -> Vec<&Value> {
    let mut seen: HashSet<ValueKey<'_>> = HashSet::new();
    let mut out = Vec::new();
    for v in dataset.column_values(idx) {
        if !v.is_null() && seen.insert(v.key()) {
            out.push(v);
        }
    }
    out
}

/// Most frequent non-missing value of a column, or `None` when the column has
/// no non-missing values. Ties break toward the first-seen value.
pub fn mode(dataset: &DataSet, idx: usize) -> Option<Value> {
    let mut counts: HashMap<ValueKey<'_>, usize> = HashMap::new();
    let mut first_seen: Vec<&Value> = Vec::new();
    for v in dataset.column_values(idx) {
        if v.is_null() {
            continue;
        }
        let count = counts.entry(v.key()).or_insert(0);
        if *count == 0 {
            first_seen.push(v);
        }
        *count += 1;
    }

    let mut best: Option<(&Value, usize)> = None;
    for v in first_seen {
        let c = counts[&v.key()];
        if best.map(|(_, bc)| c > bc).unwrap_or(true) {
            best = Some((v, c));
        }
    }
    best.map(|(v, _)| v.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema};

    fn one_column(values: Vec<Value>, data_type: DataType) -> DataSet {
        let schema = Schema::new(vec![Field::new("c", data_type)]);
        DataSet::new(schema, values.into_iter().map(|v| vec![v]).collect())
    }

    #[test]
    fn numeric_values_skips_nulls_and_widens_ints() {
        let ds = one_column(
            vec![Value::Int64(1), Value::Null, Value::Int64(3)],
            DataType::Int64,
        );
        assert_eq!(numeric_values(&ds, 0), vec![1.0, 3.0]);
    }

    #[test]
    fn unique_count_ignores_missing() {
        let ds = one_column(
            vec![
                Value::Utf8("a".to_string()),
                Value::Utf8("a".to_string()),
                Value::Null,
                Value::Utf8("b".to_string()),
            ],
            DataType::Utf8,
        );
        assert_eq!(unique_count(&ds, 0), 2);
        assert_eq!(non_null_count(&ds, 0), 3);
    }

    #[test]
    fn mode_picks_most_frequent() {
        let ds = one_column(
            vec![
                Value::Utf8("x".to_string()),
                Value::Utf8("y".to_string()),
                Value::Utf8("y".to_string()),
                Value::Null,
            ],
            DataType::Utf8,
        );
        assert_eq!(mode(&ds, 0), Some(Value::Utf8("y".to_string())));
    }

    #[test]
    fn mode_tie_breaks_toward_first_seen() {
        let ds = one_column(
            vec![Value::Int64(7), Value::Int64(9), Value::Int64(9), Value::Int64(7)],
            DataType::Int64,
        );
        assert_eq!(mode(&ds, 0), Some(Value::Int64(7)));
    }

    #[test]
    fn mode_of_all_missing_column_is_none() {
        let ds = one_column(vec![Value::Null, Value::Null], DataType::Float64);
        assert_eq!(mode(&ds, 0), None);
    }

    #[test]
    fn float_keys_distinguish_values_by_bits() {
        assert_eq!(Value::Float64(1.5).key(), Value::Float64(1.5).key());
        assert_ne!(Value::Float64(1.5).key(), Value::Float64(2.5).key());
        assert_eq!(Value::Null.key(), Value::Null.key());
    }
}
