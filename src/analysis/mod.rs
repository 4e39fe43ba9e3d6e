//! Descriptive reporting and statistical checks over
//! [`crate::types::DataSet`].
//!
//! All functions here are read-only: they borrow a dataset and return
//! request-scoped value objects ([`ColumnReport`], [`DatasetSummary`],
//! [`DistributionStats`], [`NormalityOutcome`], [`LinearFit`]) that the
//! caller owns outright.
//!
//! Statistical-test applicability limits (too few points, Shapiro's sample
//! ceiling) are *values* in [`NormalityOutcome`], not errors, so a caller
//! sweeping many columns can collect partial results without aborting.

pub mod distribution;
pub mod normality;
pub mod regression;
pub mod report;

pub use distribution::{analyze_distribution, DistributionReport, DistributionStats};
pub use normality::{test_normality, NormalityMethod, NormalityOutcome};
pub use regression::{check_linearity_residuals, LinearFit};
pub use report::{
    generate_column_info, summarize_dataset, AlertThresholds, ColumnAlert, ColumnReport,
    DatasetSummary,
};
