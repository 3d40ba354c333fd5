//! Cache of extracted tables with row-level edit tracking.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use crate::api::client::BackendClient;
use crate::data::table::{DataRow, TableData};
use crate::error::Result;

/// Holds one [`TableData`] per file and pushes edited rows back through the
/// backend on save.
pub struct TableStore {
    api: Arc<dyn BackendClient>,
    tables: RwLock<HashMap<String, TableData>>,
    /// Files with a fetch currently in flight.
    loading: Mutex<HashSet<String>>,
}

impl TableStore {
    pub fn new(api: Arc<dyn BackendClient>) -> Self {
        TableStore {
            api,
            tables: RwLock::new(HashMap::new()),
            loading: Mutex::new(HashSet::new()),
        }
    }

    /// Fetches the extracted table for a file and caches it.
    ///
    /// Returns `Ok(false)` without fetching when a load for the same file is
    /// already in flight. A fresh load replaces any cached table and starts
    /// with a clean dirty set.
    pub async fn load(&self, file_id: &str) -> Result<bool> {
        {
            let mut loading = self.lock_loading();
            if !loading.insert(file_id.to_string()) {
                log::debug!("Load already in flight for file {}", file_id);
                return Ok(false);
            }
        }

        let result = self.api.get_data(file_id).await;
        self.lock_loading().remove(file_id);

        match result {
            Ok(data) => {
                let rows = data.rows.len();
                let table = TableData::new(file_id, data.columns, data.rows);
                self.write_tables().insert(file_id.to_string(), table);
                log::info!("Loaded table for file {} ({} rows)", file_id, rows);
                Ok(true)
            }
            Err(e) => {
                log::error!("Failed to load data for file {}: {}", file_id, e);
                Err(e.into())
            }
        }
    }

    /// Merges field updates into one row and marks it dirty. Returns `false`
    /// when the table or row is unknown.
    pub fn update_row(&self, file_id: &str, row_id: &str, updates: &BTreeMap<String, Value>) -> bool {
        let mut tables = self.write_tables();
        let table = match tables.get_mut(file_id) {
            Some(table) => table,
            None => {
                log::debug!("No cached table for file {}", file_id);
                return false;
            }
        };

        match table.row_mut(row_id) {
            Some(row) => row.merge(updates),
            None => {
                log::debug!("No row {} in table for file {}", row_id, file_id);
                return false;
            }
        }
        table.mark_modified(row_id);
        true
    }

    /// Pushes the dirty rows of a file to the backend.
    ///
    /// Returns how many rows were saved, `0` when nothing was dirty. On
    /// failure the dirty set is kept so the rows go out on the next save.
    pub async fn save(&self, file_id: &str) -> Result<usize> {
        let dirty: Vec<DataRow> = {
            let tables = self.read_tables();
            tables.get(file_id).map(|table| table.modified()).unwrap_or_default()
        };
        if dirty.is_empty() {
            log::debug!("Nothing to save for file {}", file_id);
            return Ok(0);
        }

        if let Err(e) = self.api.update_data(file_id, &dirty).await {
            log::error!("Failed to save {} row(s) for file {}: {}", dirty.len(), file_id, e);
            return Err(e.into());
        }

        if let Some(table) = self.write_tables().get_mut(file_id) {
            table.clear_modified();
        }
        log::info!("Saved {} modified row(s) for file {}", dirty.len(), file_id);
        Ok(dirty.len())
    }

    pub fn get(&self, file_id: &str) -> Option<TableData> {
        self.read_tables().get(file_id).cloned()
    }

    pub fn is_row_modified(&self, file_id: &str, row_id: &str) -> bool {
        self.read_tables()
            .get(file_id)
            .map(|table| table.is_modified(row_id))
            .unwrap_or(false)
    }

    /// Drops the cached table for a file, edits included.
    pub fn clear(&self, file_id: &str) {
        self.write_tables().remove(file_id);
    }

    fn read_tables(&self) -> RwLockReadGuard<'_, HashMap<String, TableData>> {
        match self.tables.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_tables(&self) -> RwLockWriteGuard<'_, HashMap<String, TableData>> {
        match self.tables.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock_loading(&self) -> MutexGuard<'_, HashSet<String>> {
        match self.loading.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
