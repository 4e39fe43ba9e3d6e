//! Normality testing for numeric columns.
//!
//! Three procedures are offered: Shapiro–Wilk (Royston's AS R94
//! approximation), a one-sample Kolmogorov–Smirnov test against the standard
//! normal, and Anderson–Darling with the normal-case critical-value table.
//! Applicability limits (too few points, Shapiro's 5000-sample ceiling) are
//! reported as [`NormalityOutcome`] variants rather than errors.

use std::str::FromStr;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::column;
use crate::error::{DataPrepError, DataPrepResult};
use crate::types::DataSet;

/// Minimum non-missing values for any normality test.
const MIN_SAMPLES: usize = 3;

/// Shapiro–Wilk's known applicability ceiling.
const SHAPIRO_MAX_SAMPLES: usize = 5000;

/// Normality test selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NormalityMethod {
    /// Shapiro–Wilk.
    Shapiro,
    /// One-sample Kolmogorov–Smirnov against the standard normal.
    KsTest,
    /// Anderson–Darling for normality.
    Anderson,
}

impl FromStr for NormalityMethod {
    type Err = DataPrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shapiro" => Ok(Self::Shapiro),
            "kstest" => Ok(Self::KsTest),
            "anderson" => Ok(Self::Anderson),
            other => Err(DataPrepError::UnsupportedMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// Result of [`test_normality`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NormalityOutcome {
    /// Test statistic and p-value (Shapiro–Wilk, Kolmogorov–Smirnov).
    Statistic { statistic: f64, p_value: f64 },
    /// Anderson–Darling statistic with its index-aligned critical values and
    /// significance levels (percent).
    Anderson {
        statistic: f64,
        critical_values: Vec<f64>,
        significance_levels: Vec<f64>,
    },
    /// Fewer than [`MIN_SAMPLES`] non-missing values; reported for every
    /// method before dispatch.
    InsufficientData { observed: usize, required: usize },
    /// Sample exceeds the method's applicability ceiling (Shapiro–Wilk only).
    SampleTooLarge { observed: usize, limit: usize },
}

/// Runs the selected normality test on a column's non-missing values.
///
/// Fails with [`DataPrepError::ColumnNotFound`] for an unknown column; every
/// other limit is a [`NormalityOutcome`] value so a caller iterating over
/// many columns can collect partial results.
pub fn test_normality(
    dataset: &DataSet,
    column: &str,
    method: NormalityMethod,
) -> DataPrepResult<NormalityOutcome> {
    let idx = dataset
        .column_index(column)
        .ok_or_else(|| DataPrepError::column_not_found(column))?;
    let values = column::numeric_values(dataset, idx);

    if values.len() < MIN_SAMPLES {
        return Ok(NormalityOutcome::InsufficientData {
            observed: values.len(),
            required: MIN_SAMPLES,
        });
    }

    let outcome = match method {
        NormalityMethod::Shapiro => {
            if values.len() > SHAPIRO_MAX_SAMPLES {
                NormalityOutcome::SampleTooLarge {
                    observed: values.len(),
                    limit: SHAPIRO_MAX_SAMPLES,
                }
            } else {
                shapiro_wilk(&values)
            }
        }
        NormalityMethod::KsTest => ks_standard_normal(&values),
        NormalityMethod::Anderson => anderson_darling(&values),
    };
    Ok(outcome)
}

/// Shapiro–Wilk W with Royston's AS R94 weight and p-value approximations.
fn shapiro_wilk(values: &[f64]) -> NormalityOutcome {
    let n = values.len();
    let nf = n as f64;
    let mut x = values.to_vec();
    x.sort_by(|a, b| a.total_cmp(b));

    let normal = Normal::standard();

    // Expected normal order statistics (Blom scores).
    let m: Vec<f64> = (0..n)
        .map(|i| normal.inverse_cdf((i as f64 + 1.0 - 0.375) / (nf + 0.25)))
        .collect();
    let ssq_m: f64 = m.iter().map(|v| v * v).sum();

    // Polynomial-corrected weights for the sample extremes.
    let mut a = vec![0.0; n];
    if n == 3 {
        a[0] = -(0.5f64.sqrt());
        a[2] = 0.5f64.sqrt();
    } else {
        let u = 1.0 / nf.sqrt();
        let rsn = 1.0 / ssq_m.sqrt();
        let an = -2.706056 * u.powi(5) + 4.434685 * u.powi(4) - 2.071190 * u.powi(3)
            - 0.147981 * u.powi(2)
            + 0.221157 * u
            + rsn * m[n - 1];
        if n > 5 {
            let an1 = -3.582633 * u.powi(5) + 5.682633 * u.powi(4) - 1.752461 * u.powi(3)
                - 0.293762 * u.powi(2)
                + 0.042981 * u
                + rsn * m[n - 2];
            let phi = (ssq_m - 2.0 * m[n - 1].powi(2) - 2.0 * m[n - 2].powi(2))
                / (1.0 - 2.0 * an.powi(2) - 2.0 * an1.powi(2));
            let scale = phi.sqrt();
            for i in 2..n - 2 {
                a[i] = m[i] / scale;
            }
            a[n - 1] = an;
            a[0] = -an;
            a[n - 2] = an1;
            a[1] = -an1;
        } else {
            let phi = (ssq_m - 2.0 * m[n - 1].powi(2)) / (1.0 - 2.0 * an.powi(2));
            let scale = phi.sqrt();
            for i in 1..n - 1 {
                a[i] = m[i] / scale;
            }
            a[n - 1] = an;
            a[0] = -an;
        }
    }

    let mean = x.iter().sum::<f64>() / nf;
    let denom: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    if denom <= 0.0 {
        // No spread at all; W is undefined.
        return NormalityOutcome::Statistic {
            statistic: f64::NAN,
            p_value: f64::NAN,
        };
    }
    let numer: f64 = a.iter().zip(&x).map(|(ai, xi)| ai * xi).sum::<f64>().powi(2);
    let w = (numer / denom).min(1.0);

    // Royston's p-value normalization.
    let p_value = if n == 3 {
        let p = 6.0 / std::f64::consts::PI
            * (w.sqrt().asin() - 0.75f64.sqrt().asin());
        p.clamp(0.0, 1.0)
    } else if n <= 11 {
        let g = -2.273 + 0.459 * nf;
        let mu = 0.5440 - 0.39978 * nf + 0.025054 * nf.powi(2) - 0.0006714 * nf.powi(3);
        let sigma =
            (1.3822 - 0.77857 * nf + 0.062767 * nf.powi(2) - 0.0020322 * nf.powi(3)).exp();
        let z = (-(g - (1.0 - w).ln()).ln() - mu) / sigma;
        1.0 - normal.cdf(z)
    } else {
        let ln_n = nf.ln();
        let mu = -1.5861 - 0.31082 * ln_n - 0.083751 * ln_n.powi(2) + 0.0038915 * ln_n.powi(3);
        let sigma = (-0.4803 - 0.082676 * ln_n + 0.0030302 * ln_n.powi(2)).exp();
        let z = ((1.0 - w).ln() - mu) / sigma;
        1.0 - normal.cdf(z)
    };

    NormalityOutcome::Statistic {
        statistic: w,
        p_value,
    }
}

/// One-sample KS statistic against the standard normal (location 0, scale 1),
/// with Stephens' asymptotic p-value.
fn ks_standard_normal(values: &[f64]) -> NormalityOutcome {
    let n = values.len();
    let nf = n as f64;
    let mut x = values.to_vec();
    x.sort_by(|a, b| a.total_cmp(b));

    let normal = Normal::standard();
    let mut d: f64 = 0.0;
    for (i, xi) in x.iter().enumerate() {
        let cdf = normal.cdf(*xi);
        let upper = (i as f64 + 1.0) / nf - cdf;
        let lower = cdf - i as f64 / nf;
        d = d.max(upper).max(lower);
    }

    let lambda = (nf.sqrt() + 0.12 + 0.11 / nf.sqrt()) * d;
    NormalityOutcome::Statistic {
        statistic: d,
        p_value: kolmogorov_survival(lambda),
    }
}

/// Asymptotic Kolmogorov survival function `Q(lambda)`.
fn kolmogorov_survival(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }
    let mut sum = 0.0;
    let mut sign = 1.0;
    for j in 1..=100 {
        let jf = j as f64;
        let term = (-2.0 * jf * jf * lambda * lambda).exp();
        sum += sign * term;
        sign = -sign;
        if term < 1e-12 {
            break;
        }
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

/// Anderson–Darling A² for normality, standardizing by the sample mean and
/// sample standard deviation, with size-adjusted critical values at the
/// 15/10/5/2.5/1 percent significance levels.
fn anderson_darling(values: &[f64]) -> NormalityOutcome {
    let n = values.len();
    let nf = n as f64;
    let mut x = values.to_vec();
    x.sort_by(|a, b| a.total_cmp(b));

    let mean = x.iter().sum::<f64>() / nf;
    let std = super::distribution::sample_std(&x);
    let normal = Normal::standard();

    let statistic = if std == 0.0 || !std.is_finite() {
        f64::NAN
    } else {
        let mut s = 0.0;
        for i in 0..n {
            let yi = (x[i] - mean) / std;
            let yni = (x[n - 1 - i] - mean) / std;
            let cdf = normal.cdf(yi).clamp(f64::MIN_POSITIVE, 1.0);
            let sf = (1.0 - normal.cdf(yni)).clamp(f64::MIN_POSITIVE, 1.0);
            s += (2.0 * i as f64 + 1.0) * (cdf.ln() + sf.ln());
        }
        -nf - s / nf
    };

    // Normal-case critical values, adjusted for sample size.
    let adjust = 1.0 + 4.0 / nf - 25.0 / (nf * nf);
    let critical_values = [0.576, 0.656, 0.787, 0.918, 1.092]
        .iter()
        .map(|cv| cv / adjust)
        .collect();

    NormalityOutcome::Anderson {
        statistic,
        critical_values,
        significance_levels: vec![15.0, 10.0, 5.0, 2.5, 1.0],
    }
}
