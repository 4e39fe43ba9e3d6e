//! Per-column distribution statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::column;
use crate::types::DataSet;

/// Distribution summary for one numeric column, computed over its
/// non-missing values only.
///
/// Moments follow the conventions of interactive data tooling: sample
/// standard deviation (n−1 denominator), adjusted Fisher–Pearson skewness,
/// and bias-corrected excess kurtosis. Statistics that need more points than
/// the column holds (std below 2, skewness below 3, kurtosis below 4) come
/// back as NaN rather than a fabricated zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub min: f64,
    pub max: f64,
    pub q25: f64,
    pub q75: f64,
}

/// Outcome of [`analyze_distribution`]: stats per resolvable column, plus a
/// note for every requested name that was skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionReport {
    /// Stats keyed by column name.
    pub stats: BTreeMap<String, DistributionStats>,
    /// One message per skipped name (absent from the dataset, non-numeric,
    /// or without non-missing values).
    pub skipped: Vec<String>,
}

/// Computes [`DistributionStats`] for each named column.
///
/// Names that are absent or non-numeric are skipped with a message, not an
/// error, so a batch can mix valid and invalid entries safely.
pub fn analyze_distribution(dataset: &DataSet, columns: &[&str]) -> DistributionReport {
    let mut stats = BTreeMap::new();
    let mut skipped = Vec::new();

    for name in columns {
        let Some(idx) = dataset.column_index(name) else {
            skipped.push(format!("column '{name}' not found"));
            continue;
        };
        if !dataset.schema.fields[idx].data_type.is_numeric() {
            skipped.push(format!("column '{name}' is not numeric"));
            continue;
        }
        let values = column::numeric_values(dataset, idx);
        if values.is_empty() {
            skipped.push(format!("column '{name}' has no non-missing values"));
            continue;
        }
        stats.insert(name.to_string(), stats_of(&values));
    }

    DistributionReport { stats, skipped }
}

fn stats_of(values: &[f64]) -> DistributionStats {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    DistributionStats {
        mean: mean(values),
        median: quantile(&sorted, 0.5),
        std: sample_std(values),
        skewness: skewness(values),
        kurtosis: excess_kurtosis(values),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        q25: quantile(&sorted, 0.25),
        q75: quantile(&sorted, 0.75),
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n−1 denominator); NaN below 2 points.
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Adjusted Fisher–Pearson skewness `G1`; NaN below 3 points, 0 when the
/// column has no spread.
fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }
    let m = mean(values);
    let nf = n as f64;
    let m2: f64 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / nf;
    let m3: f64 = values.iter().map(|v| (v - m).powi(3)).sum::<f64>() / nf;
    if m2 == 0.0 {
        return 0.0;
    }
    let g1 = m3 / m2.powf(1.5);
    g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0)
}

/// Bias-corrected excess kurtosis `G2`; NaN below 4 points, 0 when the
/// column has no spread.
fn excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return f64::NAN;
    }
    let m = mean(values);
    let nf = n as f64;
    let s = sample_std(values);
    if s == 0.0 {
        return 0.0;
    }
    let sum4: f64 = values.iter().map(|v| ((v - m) / s).powi(4)).sum();
    let lead = nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0));
    let tail = 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0));
    lead * sum4 - tail
}

/// Linear-interpolation quantile over a pre-sorted slice.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
    }
}
