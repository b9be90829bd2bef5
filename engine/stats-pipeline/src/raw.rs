//! Raw upstream rows and the fetch seam

use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One upstream row: source-specific column names mapped to raw values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: HashMap<String, Value>,
}

impl RawRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Column names present in the record
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Value of the first alias present in the record.
    ///
    /// A present-but-null alias still wins; resolution does not fall through
    /// to later aliases.
    pub fn resolve(&self, aliases: &[&str]) -> Option<&Value> {
        aliases.iter().find_map(|alias| self.fields.get(*alias))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<HashMap<String, Value>> for RawRecord {
    fn from(fields: HashMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl FromIterator<(String, Value)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

/// Upstream collaborator producing a season's weekly rows
#[async_trait::async_trait]
pub trait ObservationSource: Send + Sync {
    /// Fetch every weekly row for the season
    async fn fetch_season(&self, season: i32) -> Result<Vec<RawRecord>, FetchError>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Source backed by rows already in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<RawRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

#[async_trait::async_trait]
impl ObservationSource for StaticSource {
    async fn fetch_season(&self, _season: i32) -> Result<Vec<RawRecord>, FetchError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static source ({} rows)", self.records.len())
    }
}
