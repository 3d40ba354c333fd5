//! In-memory registry of job records.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::jobs::record::JobRecord;

/// Authoritative mapping from job id to its latest record.
///
/// Callers construct complete records; `upsert` replaces entries wholesale
/// and only defends the monotonic-progress invariant. Entries are never
/// evicted; stale terminal jobs are cheap and harmless in-memory.
#[derive(Debug, Default)]
pub struct JobTracker {
    records: RwLock<HashMap<String, JobRecord>>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, job_id: &str) -> Option<JobRecord> {
        let records = match self.records.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.get(job_id).cloned()
    }

    /// Stores the record under its id, replacing any previous entry.
    ///
    /// Progress never decreases for a given id: a regressing update keeps the
    /// previously stored maximum (the rest of the record still replaces the
    /// old one) and logs a warning. Returns the record as stored.
    pub fn upsert(&self, mut record: JobRecord) -> JobRecord {
        let mut records = match self.records.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(existing) = records.get(&record.id) {
            if existing.progress > record.progress {
                log::warn!(
                    "Job {} reported progress {}% below stored {}%; keeping the maximum",
                    record.id,
                    record.progress,
                    existing.progress
                );
                record.progress = existing.progress;
            }
        }

        records.insert(record.id.clone(), record.clone());
        record
    }

    /// All tracked records, newest first.
    pub fn get_all(&self) -> Vec<JobRecord> {
        let records = match self.records.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut all: Vec<JobRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    pub fn len(&self) -> usize {
        let records = match self.records.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::record::JobStatus;

    #[test]
    fn test_get_missing_returns_none() {
        let tracker = JobTracker::new();
        assert!(tracker.get("nope").is_none());
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_roundtrip_is_identical() {
        let tracker = JobTracker::new();
        let record = JobRecord::with_status("file-1", JobStatus::Processing, 40, "Processing... 40%");

        tracker.upsert(record.clone());
        let read_back = tracker.get(&record.id).unwrap();

        assert_eq!(read_back, record);
    }

    #[test]
    fn test_upsert_replaces_wholesale() {
        let tracker = JobTracker::new();
        let mut record = JobRecord::with_status("file-1", JobStatus::Processing, 20, "Processing... 20%");
        tracker.upsert(record.clone());

        record.progress = 60;
        record.message = Some("Processing... 60%".to_string());
        tracker.upsert(record.clone());

        let stored = tracker.get(&record.id).unwrap();
        assert_eq!(stored.progress, 60);
        assert_eq!(stored.message.as_deref(), Some("Processing... 60%"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_progress_never_decreases() {
        let tracker = JobTracker::new();
        let mut record = JobRecord::with_status("file-1", JobStatus::Processing, 80, "Processing... 80%");
        tracker.upsert(record.clone());

        record.progress = 40;
        record.message = Some("regressed".to_string());
        let stored = tracker.upsert(record.clone());

        // The clamp keeps the maximum but the rest of the update lands.
        assert_eq!(stored.progress, 80);
        assert_eq!(stored.message.as_deref(), Some("regressed"));
        assert_eq!(tracker.get(&record.id).unwrap().progress, 80);
    }

    #[test]
    fn test_get_all_newest_first() {
        let tracker = JobTracker::new();
        let older = JobRecord::new("file-1");
        std::thread::sleep(std::time::Duration::from_millis(5));
        let newer = JobRecord::new("file-2");

        tracker.upsert(older.clone());
        tracker.upsert(newer.clone());

        let all = tracker.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, older.id);
    }
}
