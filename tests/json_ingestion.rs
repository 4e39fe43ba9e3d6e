use dataprep::ingestion::{read_json_from_path, read_json_from_str};
use dataprep::types::{DataType, Field, Schema, Value};
use dataprep::DataPrepError;

fn events_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("user.name", DataType::Utf8),
        Field::new("when", DataType::Datetime),
    ])
}

#[test]
fn read_ndjson_fixture_with_nested_paths() {
    let ds = read_json_from_path("tests/fixtures/events.ndjson", &events_schema()).unwrap();

    assert_eq!(ds.row_count(), 3);
    assert_eq!(ds.rows[0][1], Value::Utf8("ada".to_string()));
    // Row 3 has an empty user object and a null timestamp.
    assert_eq!(ds.rows[2][1], Value::Null);
    assert_eq!(ds.rows[2][2], Value::Null);
}

#[test]
fn read_json_array_of_objects() {
    let schema = Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("label", DataType::Utf8),
    ]);
    let ds = read_json_from_str(r#"[{"id":1,"label":"a"},{"id":2,"label":"b"}]"#, &schema).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.rows[1][0], Value::Int64(2));
}

#[test]
fn read_json_rejects_non_object_rows() {
    let schema = Schema::new(vec![Field::new("id", DataType::Int64)]);
    let err = read_json_from_str("[1, 2, 3]", &schema).unwrap_err();
    assert!(matches!(err, DataPrepError::SchemaMismatch { .. }));
}

#[test]
fn read_json_reports_type_mismatches_with_location() {
    let schema = Schema::new(vec![Field::new("id", DataType::Int64)]);
    let err = read_json_from_str(r#"[{"id":1},{"id":"two"}]"#, &schema).unwrap_err();
    match err {
        DataPrepError::ParseError { row, column, .. } => {
            assert_eq!(row, 2);
            assert_eq!(column, "id");
        }
        other => panic!("unexpected error: {other}"),
    }
}
