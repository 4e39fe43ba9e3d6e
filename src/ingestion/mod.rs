//! Schema-driven readers that load tabular files into a
//! [`crate::types::DataSet`].
//!
//! CSV and JSON are always available; Excel is gated behind the `excel`
//! feature. [`read_from_path`] dispatches on the file extension. Every reader
//! maps empty or absent cells to [`crate::types::Value::Null`] so downstream
//! cleaning sees one uniform missing marker.

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod json;
pub mod reader;

pub use csv::{read_csv_from_path, read_csv_from_reader, read_csv_inferred, CsvOptions};
#[cfg(feature = "excel")]
pub use excel::read_excel_from_path;
pub use json::{read_json_from_path, read_json_from_str};
pub use reader::{read_from_path, Format};
