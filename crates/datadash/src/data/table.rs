//! Extracted tabular data with client-side dirty-row tracking.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One extracted row: a stable id plus arbitrary named columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl DataRow {
    pub fn new(id: impl Into<String>) -> Self {
        DataRow {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter, used heavily by the mock generator.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Merges field updates into the row; existing keys are overwritten.
    pub fn merge(&mut self, updates: &BTreeMap<String, Value>) {
        for (key, value) in updates {
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

/// A loaded table for one file, including which rows were edited locally
/// and not yet saved back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    pub file_id: String,
    pub columns: Vec<String>,
    pub rows: Vec<DataRow>,
    #[serde(default)]
    pub modified_rows: HashSet<String>,
}

impl TableData {
    pub fn new(file_id: impl Into<String>, columns: Vec<String>, rows: Vec<DataRow>) -> Self {
        TableData {
            file_id: file_id.into(),
            columns,
            rows,
            modified_rows: HashSet::new(),
        }
    }

    pub fn row_mut(&mut self, row_id: &str) -> Option<&mut DataRow> {
        self.rows.iter_mut().find(|row| row.id == row_id)
    }

    pub fn mark_modified(&mut self, row_id: impl Into<String>) {
        self.modified_rows.insert(row_id.into());
    }

    pub fn is_modified(&self, row_id: &str) -> bool {
        self.modified_rows.contains(row_id)
    }

    /// The dirty rows in table order, as sent to the backend on save.
    pub fn modified(&self) -> Vec<DataRow> {
        self.rows
            .iter()
            .filter(|row| self.modified_rows.contains(&row.id))
            .cloned()
            .collect()
    }

    pub fn clear_modified(&mut self) {
        self.modified_rows.clear();
    }
}
