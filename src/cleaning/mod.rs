//! Cleaning transformations over [`crate::types::DataSet`].
//!
//! Every operation takes a dataset by reference and returns a new dataset
//! (or a report wrapping one); the input is never mutated. Structural misuse
//! (unknown column, unknown method token) is a hard [`crate::DataPrepError`];
//! data-shape edge cases reachable from valid input (a column with no mode,
//! an absent optional target, no infinities present) are documented no-ops.
//!
//! Operations:
//!
//! - [`drop_columns`] / [`remove_duplicates`]
//! - [`fill_missing`] with a [`FillMethod`] strategy
//! - [`handle_infinite_values`] (convert-to-missing or cap at finite bounds)
//! - [`clean_column_names`] (identifier-safe renaming with invertible mapping)
//! - [`is_suitable_categorical`] / [`get_categorical_columns`]
//! - [`prepare_for_analysis`] / [`clean_comprehensive`]
//! - [`convert_column`] (explicit type casts)

pub mod categorical;
pub mod convert;
pub mod drop;
pub mod fill;
pub mod infinite;
pub mod names;
pub mod prepare;

pub use categorical::{get_categorical_columns, is_suitable_categorical, CategoricalThresholds};
pub use convert::convert_column;
pub use drop::{drop_columns, remove_duplicates};
pub use fill::{fill_missing, FillMethod};
pub use infinite::{handle_infinite_values, CellLocation, InfiniteValueReport};
pub use names::{clean_column_names, ColumnNameReport, RenamedColumn};
pub use prepare::{clean_comprehensive, prepare_for_analysis};
