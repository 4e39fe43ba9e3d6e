use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dataprep::cleaning::{fill_missing, handle_infinite_values, remove_duplicates, FillMethod};
use dataprep::types::{DataSet, DataType, Field, Schema, Value};

/// 10k rows with duplicates, missing cells, and a few infinities.
fn synthetic_dataset() -> DataSet {
    let schema = Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("label", DataType::Utf8),
        Field::new("value", DataType::Float64),
    ]);
    let rows = (0..10_000)
        .map(|i| {
            let value = match i % 97 {
                0 => Value::Null,
                1 => Value::Float64(f64::INFINITY),
                _ => Value::Float64((i % 1000) as f64 * 0.5),
            };
            vec![
                Value::Int64((i % 5000) as i64),
                Value::Utf8(format!("label_{}", i % 50)),
                value,
            ]
        })
        .collect();
    DataSet::new(schema, rows)
}

fn bench_cleaning(c: &mut Criterion) {
    let ds = synthetic_dataset();

    c.bench_function("remove_duplicates_10k", |b| {
        b.iter(|| remove_duplicates(black_box(&ds)))
    });

    c.bench_function("fill_missing_mean_10k", |b| {
        b.iter(|| fill_missing(black_box(&ds), &FillMethod::Mean))
    });

    c.bench_function("handle_infinite_cap_10k", |b| {
        b.iter(|| handle_infinite_values(black_box(&ds), false, true))
    });
}

criterion_group!(benches, bench_cleaning);
criterion_main!(benches);
