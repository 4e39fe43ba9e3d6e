//! Core data model types for cleaning and analysis.
//!
//! The engine operates on an in-memory [`DataSet`]: an ordered list of typed
//! [`Field`]s plus row-major value storage. Every transformation returns a new
//! [`DataSet`]; callers' datasets are never mutated.

use serde::{Deserialize, Serialize};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string (text / categorical).
    Utf8,
    /// Timestamp, stored as milliseconds since the Unix epoch (UTC).
    Datetime,
}

impl DataType {
    /// Whether values of this type participate in numeric operations
    /// (imputation by mean/median, distribution stats, infinity handling).
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the shape of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
///
/// [`Value::Null`] is the missing marker, distinct from every domain value.
/// Numeric infinity is representable as `Value::Float64(f64::INFINITY)` /
/// `Value::Float64(f64::NEG_INFINITY)` and is *not* missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Milliseconds since the Unix epoch (UTC).
    Datetime(i64),
}

impl Value {
    /// Whether this cell is the missing marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell, if it holds a number.
    ///
    /// `Int64` widens to `f64`; `Null` and non-numeric values yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether the cell holds positive or negative infinity.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Value::Float64(v) if v.is_infinite())
    }

    /// Human-readable rendering used in column reports.
    pub fn render(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Float64(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Utf8(s) => s.clone(),
            // Out-of-range timestamps fall back to the raw millisecond count.
            Value::Datetime(ms) => chrono::DateTime::from_timestamp_millis(*ms)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| ms.to_string()),
        }
    }

    /// Approximate heap footprint of the cell beyond its enum slot.
    pub(crate) fn heap_bytes(&self) -> usize {
        match self {
            Value::Utf8(s) => s.len(),
            _ => 0,
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`]
/// fields. Row length is uniform and equal to the schema field count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Returns the index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    /// Iterate the cells of one column in row order.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset by applying `mapper` to every row.
    ///
    /// The returned dataset preserves the original schema.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the
    /// schema field count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let expected_len = self.schema.fields.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match schema length {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Approximate memory footprint in bytes: enum slots for every cell plus
    /// string heap contents and schema names.
    pub fn approx_memory_bytes(&self) -> usize {
        let cell_slots = self.row_count() * self.column_count() * std::mem::size_of::<Value>();
        let heap: usize = self
            .rows
            .iter()
            .flat_map(|row| row.iter().map(Value::heap_bytes))
            .sum();
        let names: usize = self.schema.fields.iter().map(|f| f.name.len()).sum();
        cell_slots + heap + names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Utf8("a".to_string())],
                vec![Value::Int64(2), Value::Null],
            ],
        )
    }

    #[test]
    fn null_is_distinct_from_infinity() {
        assert!(Value::Null.is_null());
        assert!(!Value::Float64(f64::INFINITY).is_null());
        assert!(Value::Float64(f64::NEG_INFINITY).is_infinite());
        assert!(!Value::Null.is_infinite());
    }

    #[test]
    fn as_f64_widens_ints_and_rejects_text() {
        assert_eq!(Value::Int64(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float64(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Utf8("3".to_string()).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn column_values_walks_rows_in_order() {
        let ds = sample();
        let ids: Vec<&Value> = ds.column_values(0).collect();
        assert_eq!(ids, vec![&Value::Int64(1), &Value::Int64(2)]);
    }

    #[test]
    fn filter_rows_preserves_schema_and_input() {
        let ds = sample();
        let out = ds.filter_rows(|row| !row[1].is_null());
        assert_eq!(out.schema, ds.schema);
        assert_eq!(out.row_count(), 1);
        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    #[should_panic(expected = "mapped row length")]
    fn map_rows_panics_on_wrong_arity() {
        let ds = sample();
        let _ = ds.map_rows(|_| vec![Value::Null]);
    }

    #[test]
    fn approx_memory_counts_string_heap() {
        let ds = sample();
        let base = ds.row_count() * ds.column_count() * std::mem::size_of::<Value>();
        // "a" + field names "id"/"name".
        assert_eq!(ds.approx_memory_bytes(), base + 1 + 2 + 4);
    }
}
