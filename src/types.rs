use crate::error::LoadError;
use serde::Serialize;
use std::collections::HashMap;

/// Column names the dashboard reads. Everything else passes through untouched.
pub mod columns {
    pub const MAKE: &str = "Make";
    pub const STATE: &str = "State";
    pub const MODEL_YEAR: &str = "Model Year";
    pub const EV_TYPE: &str = "Electric Vehicle Type";
}

/// One parsed CSV record keyed by (trimmed) header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of `column`, or `None` when the column is missing or blank.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// All rows of one load, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Build a dataset from rows alone; headers are taken from the first row.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut headers: Vec<String> = rows
            .first()
            .map(|r| r.columns().map(str::to_string).collect())
            .unwrap_or_default();
        headers.sort();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Result of a load, keeping "no rows" apart from "load failed".
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Dataset),
    Failed(LoadError),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Failed(e) => Some(e),
        }
    }

    /// The loaded rows, or an empty dataset when the load failed.
    pub fn dataset(&self) -> Dataset {
        match self {
            LoadOutcome::Loaded(ds) => ds.clone(),
            LoadOutcome::Failed(_) => Dataset::default(),
        }
    }

    pub fn into_dataset(self) -> Dataset {
        match self {
            LoadOutcome::Loaded(ds) => ds,
            LoadOutcome::Failed(_) => Dataset::default(),
        }
    }
}

impl From<Result<Dataset, LoadError>> for LoadOutcome {
    fn from(res: Result<Dataset, LoadError>) -> Self {
        match res {
            Ok(ds) => LoadOutcome::Loaded(ds),
            Err(e) => LoadOutcome::Failed(e),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_count: usize,
    pub unique_make_count: usize,
    pub unique_state_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    #[serde(rename = "name")]
    pub key: String,
    pub count: usize,
}

impl GroupCount {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: String,
    pub count: usize,
}

impl YearCount {
    pub fn new(year: impl Into<String>, count: usize) -> Self {
        Self {
            year: year.into(),
            count,
        }
    }
}
