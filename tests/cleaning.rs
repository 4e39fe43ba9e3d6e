use dataprep::cleaning::{
    clean_column_names, drop_columns, fill_missing, get_categorical_columns,
    handle_infinite_values, remove_duplicates, FillMethod,
};
use dataprep::ingestion::csv::{read_csv_from_path, CsvOptions};
use dataprep::types::{DataSet, DataType, Field, Schema, Value};
use dataprep::DataPrepError;

fn grades() -> DataSet {
    let schema = Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("name", DataType::Utf8),
        Field::new("score", DataType::Float64),
        Field::new("active", DataType::Bool),
    ]);
    read_csv_from_path("tests/fixtures/grades.csv", &schema, CsvOptions::default()).unwrap()
}

#[test]
fn dedupe_then_fill_produces_a_complete_numeric_column() {
    let ds = grades();
    assert_eq!(ds.row_count(), 5);

    let deduped = remove_duplicates(&ds);
    assert_eq!(deduped.row_count(), 4);

    // Mean of 98.5, 77.0, 61.25 over the deduped rows.
    let filled = fill_missing(&deduped, &FillMethod::Mean);
    let score_idx = filled.column_index("score").unwrap();
    assert!(filled.column_values(score_idx).all(|v| !v.is_null()));
    match filled.rows[1][score_idx] {
        Value::Float64(v) => assert!((v - 236.75 / 3.0).abs() < 1e-12),
        ref other => panic!("unexpected cell: {other:?}"),
    }
}

#[test]
fn drop_columns_validates_before_mutating() {
    let ds = grades();
    let err = drop_columns(&ds, &["score", "ghost"]).unwrap_err();
    assert!(matches!(err, DataPrepError::ColumnNotFound { column } if column == "ghost"));

    let dropped = drop_columns(&ds, &["name", "active"]).unwrap();
    assert_eq!(
        dropped.schema.field_names().collect::<Vec<_>>(),
        vec!["id", "score"]
    );
    assert_eq!(dropped.row_count(), 5);
}

#[test]
fn infinite_handling_composes_with_fill() {
    let schema = Schema::new(vec![Field::new("v", DataType::Float64)]);
    let ds = DataSet::new(
        schema,
        vec![
            vec![Value::Float64(1.0)],
            vec![Value::Float64(f64::INFINITY)],
            vec![Value::Float64(3.0)],
            vec![Value::Null],
        ],
    );

    let report = handle_infinite_values(&ds, true, true);
    assert_eq!(report.locations.len(), 1);
    assert_eq!(report.locations[0].row, 1);

    let filled = fill_missing(&report.dataset, &FillMethod::Median);
    // Median of {1.0, 3.0} fills both the converted infinity and the null.
    assert_eq!(filled.rows[1][0], Value::Float64(2.0));
    assert_eq!(filled.rows[3][0], Value::Float64(2.0));
}

#[test]
fn name_cleaning_is_invertible_on_messy_headers() {
    let schema = Schema::new(vec![
        Field::new("First Name", DataType::Utf8),
        Field::new("2024 total", DataType::Float64),
        Field::new("First Name", DataType::Utf8),
    ]);
    let ds = DataSet::new(schema, vec![]);

    let report = clean_column_names(&ds);
    assert_eq!(
        report.dataset.schema.field_names().collect::<Vec<_>>(),
        vec!["First_Name", "_2024_total", "First_Name_1"]
    );

    let reverse = report.reverse();
    assert_eq!(reverse["First_Name"], "First Name");
    assert_eq!(reverse["_2024_total"], "2024 total");
}

#[test]
fn categorical_candidates_exclude_requested_columns() {
    let ds = grades();
    let candidates = get_categorical_columns(&ds, &["name"]);
    // "name" excluded; low-cardinality id qualifies, the bool column is
    // non-numeric and qualifies, score is numeric with enough spread but few
    // rows so cardinality keeps it in too.
    assert!(!candidates.contains(&"name".to_string()));
    assert!(candidates.contains(&"active".to_string()));
}
