//! Column-name normalization and deterministic uniquing.

use std::collections::{HashMap, HashSet};

use crate::types::DataSet;

/// One column's rename, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedColumn {
    /// Column position in the dataset.
    pub index: usize,
    /// Name before cleaning.
    pub original: String,
    /// Name after cleaning and uniquing.
    pub cleaned: String,
}

/// Outcome of [`clean_column_names`]: the renamed dataset plus the per-column
/// rename records, from which forward and reverse mappings are derived.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnNameReport {
    /// Dataset with cleaned column names.
    pub dataset: DataSet,
    /// Rename records in schema order.
    pub renames: Vec<RenamedColumn>,
}

impl ColumnNameReport {
    /// Original → cleaned mapping. When two original names were identical,
    /// the later column wins the map slot; [`ColumnNameReport::renames`]
    /// keeps the full per-column record.
    pub fn forward(&self) -> HashMap<String, String> {
        self.renames
            .iter()
            .map(|r| (r.original.clone(), r.cleaned.clone()))
            .collect()
    }

    /// Cleaned → original mapping. Cleaned names are unique by construction,
    /// so this is a true inverse: applying it to every renamed column
    /// recovers exactly the original names.
    pub fn reverse(&self) -> HashMap<String, String> {
        self.renames
            .iter()
            .map(|r| (r.cleaned.clone(), r.original.clone()))
            .collect()
    }
}

/// Returns the dataset with every column renamed to a valid identifier.
///
/// Each name is trimmed, every maximal run of non-alphanumeric characters is
/// collapsed to a single underscore, a leading underscore is prepended when
/// the result starts with a digit, and an empty result falls back to
/// `col_<index>`. Collisions are resolved by [`uniquify_names`].
pub fn clean_column_names(dataset: &DataSet) -> ColumnNameReport {
    let normalized: Vec<String> = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, f)| normalize_name(&f.name, idx))
        .collect();
    let unique = uniquify_names(&normalized);

    let mut out = dataset.clone();
    let mut renames = Vec::with_capacity(unique.len());
    for (idx, cleaned) in unique.into_iter().enumerate() {
        renames.push(RenamedColumn {
            index: idx,
            original: dataset.schema.fields[idx].name.clone(),
            cleaned: cleaned.clone(),
        });
        out.schema.fields[idx].name = cleaned;
    }

    ColumnNameReport {
        dataset: out,
        renames,
    }
}

/// Resolve name collisions deterministically, in first-seen order.
///
/// The first occurrence keeps the bare name; later duplicates get `_1`, `_2`,
/// … suffixes, skipping candidates already taken by other columns.
pub fn uniquify_names(names: &[String]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let mut candidate = name.clone();
        let mut counter = 1;
        while used.contains(&candidate) {
            candidate = format!("{name}_{counter}");
            counter += 1;
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

fn normalize_name(raw: &str, index: usize) -> String {
    let trimmed = raw.trim();
    let mut name = String::with_capacity(trimmed.len());
    let mut in_run = false;
    for ch in trimmed.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            name.push(ch);
            in_run = false;
        } else if !in_run {
            name.push('_');
            in_run = true;
        }
    }

    if name.is_empty() {
        return format!("col_{index}");
    }
    if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
