//! Extension-based format dispatch.

use std::path::Path;

use crate::error::{DataPrepError, DataPrepResult};
use crate::types::{DataSet, Schema};

use super::csv::{self, CsvOptions};
use super::json;

/// Tabular input formats recognized by [`read_from_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array-of-objects or NDJSON.
    Json,
    /// Excel workbook (first sheet).
    Excel,
}

impl Format {
    /// Maps a file extension (case-insensitive) to a format.
    pub fn from_path(path: impl AsRef<Path>) -> DataPrepResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| DataPrepError::UnsupportedFormat {
                message: format!("path '{}' has no file extension", path.display()),
            })?;
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" | "ndjson" | "jsonl" => Ok(Self::Json),
            "xlsx" | "xls" | "ods" => Ok(Self::Excel),
            other => Err(DataPrepError::UnsupportedFormat {
                message: format!("unrecognized file extension '{other}'"),
            }),
        }
    }
}

/// Reads a file into a [`DataSet`], picking the reader from the file
/// extension.
///
/// Excel paths require the `excel` feature; without it they fail with
/// [`DataPrepError::UnsupportedFormat`].
pub fn read_from_path(path: impl AsRef<Path>, schema: &Schema) -> DataPrepResult<DataSet> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Csv => csv::read_csv_from_path(path, schema, CsvOptions::default()),
        Format::Tsv => csv::read_csv_from_path(path, schema, CsvOptions { delimiter: b'\t' }),
        Format::Json => json::read_json_from_path(path, schema),
        #[cfg(feature = "excel")]
        Format::Excel => super::excel::read_excel_from_path(path, None, schema),
        #[cfg(not(feature = "excel"))]
        Format::Excel => Err(DataPrepError::UnsupportedFormat {
            message: "excel support requires the 'excel' feature".to_string(),
        }),
    }
}
