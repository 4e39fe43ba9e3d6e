use dataprep::analysis::{
    analyze_distribution, check_linearity_residuals, generate_column_info, summarize_dataset,
    test_normality, AlertThresholds, ColumnAlert, NormalityMethod, NormalityOutcome,
};
use dataprep::types::{DataSet, DataType, Field, Schema, Value};

/// 100 rows: `id` (unique ints), `group` (2 labels), `score` (40% missing),
/// `value` (linear in id).
fn survey() -> DataSet {
    let schema = Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("group", DataType::Utf8),
        Field::new("score", DataType::Float64),
        Field::new("value", DataType::Float64),
    ]);
    let rows = (0..100)
        .map(|i| {
            let score = if i % 5 < 2 {
                Value::Null
            } else {
                Value::Float64(50.0 + (i % 10) as f64)
            };
            let label = if i % 2 == 0 { "a" } else { "b" };
            vec![
                Value::Int64(i),
                Value::Utf8(label.to_string()),
                score,
                Value::Float64(2.0 * i as f64 + 1.0),
            ]
        })
        .collect();
    DataSet::new(schema, rows)
}

#[test]
fn column_info_flags_heavy_missingness() {
    let ds = survey();
    let reports = generate_column_info(&ds, &AlertThresholds::default());
    let score = reports.iter().find(|r| r.name == "score").unwrap();
    assert_eq!(score.missing_count, 40);
    assert_eq!(score.alert, ColumnAlert::LotsOfMissingItems);
    assert_eq!(score.alert.to_string(), "lots of missing items");
}

#[test]
fn column_info_passes_balanced_columns() {
    let ds = survey();
    let reports = generate_column_info(&ds, &AlertThresholds::default());
    let group = reports.iter().find(|r| r.name == "group").unwrap();
    assert_eq!(group.missing_count, 0);
    assert_eq!(group.unique_count, 2);
    assert_eq!(group.alert, ColumnAlert::LooksFine);
}

#[test]
fn summary_counts_missing_and_column_kinds() {
    let ds = survey();
    let summary = summarize_dataset(&ds);
    assert_eq!(summary.rows, 100);
    assert_eq!(summary.columns, 4);
    assert_eq!(summary.total_missing, 40);
    assert_eq!(summary.missing_percent, 10.0);
    assert_eq!(summary.numeric_columns, 3);
    assert_eq!(summary.categorical_columns, 1);
    assert_eq!(summary.duplicate_rows, 0);
}

#[test]
fn distribution_covers_numeric_columns_and_skips_the_rest() {
    let ds = survey();
    let report = analyze_distribution(&ds, &["value", "group", "missing_col"]);
    assert!(report.stats.contains_key("value"));
    assert_eq!(report.skipped.len(), 2);

    let value = &report.stats["value"];
    // value = 2*id + 1 over id 0..100.
    assert!((value.mean - 100.0).abs() < 1e-9);
    assert!((value.min - 1.0).abs() < 1e-9);
    assert!((value.max - 199.0).abs() < 1e-9);
    assert!(value.skewness.abs() < 1e-9);
}

#[test]
fn normality_guardrails_apply_before_method_dispatch() {
    let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
    let tiny = DataSet::new(
        schema,
        vec![vec![Value::Float64(1.0)], vec![Value::Float64(2.0)]],
    );
    for method in [
        NormalityMethod::Shapiro,
        NormalityMethod::KsTest,
        NormalityMethod::Anderson,
    ] {
        assert_eq!(
            test_normality(&tiny, "x", method).unwrap(),
            NormalityOutcome::InsufficientData {
                observed: 2,
                required: 3
            }
        );
    }
}

#[test]
fn uniform_data_fails_shapiro() {
    let ds = survey();
    // `value` is a uniform grid, decidedly non-normal at n=100.
    let outcome = test_normality(&ds, "value", NormalityMethod::Shapiro).unwrap();
    match outcome {
        NormalityOutcome::Statistic { p_value, .. } => assert!(p_value < 0.05),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn perfect_line_yields_zero_residuals() {
    let ds = survey();
    let fit = check_linearity_residuals(&ds, "value", "id").unwrap();
    assert!((fit.slope - 2.0).abs() < 1e-9);
    assert!((fit.intercept - 1.0).abs() < 1e-9);
    assert_eq!(fit.fitted.len(), 100);
    assert!(fit.residuals.iter().all(|r| r.abs() < 1e-9));
}
