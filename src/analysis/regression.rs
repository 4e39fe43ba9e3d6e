//! Simple linear regression for linearity diagnostics.
//!
//! Fits an ordinary-least-squares line of the target on a single feature and
//! reports the fitted values and residuals, the raw material for a
//! residuals-versus-fitted linearity check.

use serde::Serialize;

use crate::error::{DataPrepError, DataPrepResult};
use crate::types::DataSet;

/// An OLS line fit of one target column on one feature column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Fitted target values, one per usable row in original row order.
    pub fitted: Vec<f64>,
    /// Residuals (observed minus fitted), index-aligned with `fitted`.
    pub residuals: Vec<f64>,
}

/// Fits `target ~ feature` by ordinary least squares over rows where both
/// columns hold numeric, non-missing, finite values.
///
/// A zero-variance feature cannot carry a slope; the fit degenerates to the
/// target mean. Fewer than two usable rows is an error: a line through at
/// most one point says nothing about linearity.
pub fn check_linearity_residuals(
    dataset: &DataSet,
    target: &str,
    feature: &str,
) -> DataPrepResult<LinearFit> {
    let target_idx = dataset
        .column_index(target)
        .ok_or_else(|| DataPrepError::column_not_found(target))?;
    let feature_idx = dataset
        .column_index(feature)
        .ok_or_else(|| DataPrepError::column_not_found(feature))?;

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for row in &dataset.rows {
        let (Some(x), Some(y)) = (row[feature_idx].as_f64(), row[target_idx].as_f64()) else {
            continue;
        };
        if x.is_finite() && y.is_finite() {
            xs.push(x);
            ys.push(y);
        }
    }

    if xs.len() < 2 {
        return Err(DataPrepError::InsufficientData {
            column: target.to_string(),
            required: 2,
            observed: xs.len(),
        });
    }

    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;
    let sxx: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();
    let sxy: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum();

    let (slope, intercept) = if sxx == 0.0 {
        (0.0, y_mean)
    } else {
        let slope = sxy / sxx;
        (slope, y_mean - slope * x_mean)
    };

    let fitted: Vec<f64> = xs.iter().map(|x| slope * x + intercept).collect();
    let residuals: Vec<f64> = ys.iter().zip(&fitted).map(|(y, f)| y - f).collect();

    Ok(LinearFit {
        slope,
        intercept,
        fitted,
        residuals,
    })
}
