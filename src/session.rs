//! Interactive session state: an original dataset, a working copy, and an
//! append-only log of the transformations applied so far.
//!
//! The engine functions in [`crate::cleaning`] are pure `dataset -> dataset`
//! operations; this module layers command dispatch on top so a front end can
//! replay, export, or reset a cleaning run. A failed command leaves the
//! working dataset exactly as it was.

use serde::Serialize;

use crate::cleaning::{
    self, FillMethod, clean_column_names, clean_comprehensive, convert_column, drop_columns,
    fill_missing, handle_infinite_values, prepare_for_analysis, remove_duplicates,
};
use crate::error::DataPrepResult;
use crate::types::{DataSet, DataType};

/// One transformation step. Serialization of the log yields a replayable
/// record of the whole cleaning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    DropColumns {
        columns: Vec<String>,
    },
    FillMissing {
        method: FillMethod,
    },
    RemoveDuplicates,
    HandleInfiniteValues {
        convert_to_missing: bool,
    },
    CleanColumnNames,
    CleanComprehensive,
    ConvertColumn {
        column: String,
        to: DataType,
    },
    PrepareForAnalysis {
        target: Option<String>,
    },
}

/// A cleaning session over one loaded dataset.
///
/// `original` is the dataset as loaded and never changes; `current` is the
/// result of every successfully applied command so far.
#[derive(Debug, Clone)]
pub struct Session {
    original: DataSet,
    current: DataSet,
    log: Vec<Command>,
}

impl Session {
    /// Starts a session with the loaded dataset as both original and current.
    pub fn new(dataset: DataSet) -> Self {
        Self {
            original: dataset.clone(),
            current: dataset,
            log: Vec::new(),
        }
    }

    /// The dataset as originally loaded.
    pub fn original(&self) -> &DataSet {
        &self.original
    }

    /// The working dataset after every applied command.
    pub fn current(&self) -> &DataSet {
        &self.current
    }

    /// Commands applied so far, in order.
    pub fn log(&self) -> &[Command] {
        &self.log
    }

    /// Applies one command to the working dataset and records it in the log.
    ///
    /// On error the working dataset and the log are left untouched, so the
    /// session always holds the last good state.
    pub fn apply(&mut self, command: Command) -> DataPrepResult<&DataSet> {
        let next = match &command {
            Command::DropColumns { columns } => {
                let names: Vec<&str> = columns.iter().map(String::as_str).collect();
                drop_columns(&self.current, &names)?
            }
            Command::FillMissing { method } => fill_missing(&self.current, method),
            Command::RemoveDuplicates => remove_duplicates(&self.current),
            Command::HandleInfiniteValues { convert_to_missing } => {
                handle_infinite_values(&self.current, *convert_to_missing, false).dataset
            }
            Command::CleanColumnNames => clean_column_names(&self.current).dataset,
            Command::CleanComprehensive => clean_comprehensive(&self.current),
            Command::ConvertColumn { column, to } => {
                convert_column(&self.current, column, *to)?
            }
            Command::PrepareForAnalysis { target } => {
                prepare_for_analysis(&self.current, target.as_deref())
            }
        };
        self.current = next;
        self.log.push(command);
        Ok(&self.current)
    }

    /// Discards every applied command and restores the original dataset.
    ///
    /// The log is cleared as well: after a reset the session reads as fresh.
    pub fn reset(&mut self) {
        self.current = self.original.clone();
        self.log.clear();
    }

    /// Exports the command log as pretty-printed JSON.
    pub fn log_json(&self) -> DataPrepResult<String> {
        Ok(serde_json::to_string_pretty(&self.log)?)
    }

    /// Share of cells still missing in the working dataset, `0.0..=1.0`.
    pub fn missing_ratio(&self) -> f64 {
        let cells = self.current.row_count() * self.current.column_count();
        if cells == 0 {
            return 0.0;
        }
        let missing: usize = self
            .current
            .rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|v| v.is_null())
            .count();
        missing as f64 / cells as f64
    }

    /// Convenience dispatcher for string-keyed fill requests, as issued by an
    /// interactive front end.
    pub fn fill_missing_by_name(
        &mut self,
        method: &str,
        custom: Option<crate::types::Value>,
    ) -> DataPrepResult<&DataSet> {
        let method = cleaning::FillMethod::parse(method, custom)?;
        self.apply(Command::FillMissing { method })
    }
}
