//! `dataprep` is a library for interactive data cleaning and exploratory
//! analysis over an in-memory [`types::DataSet`].
//!
//! A dataset is loaded once (CSV, JSON, or Excel via the `excel` feature),
//! then transformed through pure cleaning operations and inspected through
//! analysis routines. Every operation takes the dataset by reference and
//! returns a new one; nothing mutates in place, so the original loaded data
//! is always recoverable.
//!
//! ## What it does
//!
//! **Cleaning** ([`cleaning`]):
//!
//! - drop columns, remove duplicate rows
//! - fill missing values (mean / median / mode / forward / backward / custom)
//! - convert infinite values to missing, or cap them at finite column bounds
//! - normalize column names into unique, identifier-safe form with an
//!   invertible original-to-cleaned mapping
//! - flag categorical-encoding candidates, cast columns between types
//!
//! **Analysis** ([`analysis`]):
//!
//! - per-column reports (missingness, uniques, mode, quality alerts) and
//!   whole-dataset summaries
//! - distribution statistics (moments and quartiles) for numeric columns
//! - normality tests (Shapiro–Wilk, Kolmogorov–Smirnov, Anderson–Darling)
//! - linearity diagnostics via simple linear regression residuals
//!
//! **Sessions** ([`session`]): a [`session::Session`] holds the original
//! dataset, the current working copy, and a serializable log of applied
//! [`session::Command`]s; a failed command never corrupts the working copy.
//!
//! ## Quick example: clean and summarize
//!
//! ```rust
//! use dataprep::cleaning::{fill_missing, remove_duplicates, FillMethod};
//! use dataprep::analysis::summarize_dataset;
//! use dataprep::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("id", DataType::Int64),
//!     Field::new("score", DataType::Float64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::Float64(10.0)],
//!         vec![Value::Int64(2), Value::Null],
//!         vec![Value::Int64(2), Value::Null],
//!         vec![Value::Int64(3), Value::Float64(20.0)],
//!     ],
//! );
//!
//! let deduped = remove_duplicates(&ds);
//! assert_eq!(deduped.row_count(), 3);
//!
//! let filled = fill_missing(&deduped, &FillMethod::Mean);
//! let summary = summarize_dataset(&filled);
//! assert_eq!(summary.total_missing, 0);
//! ```
//!
//! ## Quick example: load and test a column
//!
//! ```no_run
//! use dataprep::analysis::{test_normality, NormalityMethod};
//! use dataprep::ingestion::read_from_path;
//! use dataprep::types::{DataType, Field, Schema};
//!
//! # fn main() -> Result<(), dataprep::DataPrepError> {
//! let schema = Schema::new(vec![
//!     Field::new("id", DataType::Int64),
//!     Field::new("score", DataType::Float64),
//! ]);
//! // Reader picked by extension (.csv/.tsv/.json/.ndjson/.xlsx...).
//! let ds = read_from_path("data.csv", &schema)?;
//! let outcome = test_normality(&ds, "score", NormalityMethod::Shapiro)?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`ingestion`]: schema-driven file readers with extension dispatch
//! - [`cleaning`]: pure dataset-to-dataset cleaning transformations
//! - [`analysis`]: column reports, distribution statistics, statistical tests
//! - [`session`]: original/current state tracking with a replayable log
//! - [`error`]: the error type shared across the crate

pub mod analysis;
pub mod cleaning;
mod column;
pub mod error;
pub mod ingestion;
pub mod session;
pub mod types;

pub use error::{DataPrepError, DataPrepResult};
