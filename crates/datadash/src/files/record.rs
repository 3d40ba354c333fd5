//! File record for one upload and its extraction linkage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Externally driven states of an uploaded file. Advances roughly in
/// declaration order but is not an enforced machine: upload code sets the
/// first three, the poller sets the terminal two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Uploading,
    Uploaded,
    Processing,
    Completed,
    Error,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Uploading => "uploading",
            FileStatus::Uploaded => "uploaded",
            FileStatus::Processing => "processing",
            FileStatus::Completed => "completed",
            FileStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub size: u64,
    /// Key assigned by the storage collaborator; empty until uploaded.
    pub storage_key: String,
    pub upload_progress: u8,
    pub status: FileStatus,
    /// Back-reference to the extraction job, set once extraction starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl FileRecord {
    /// Creates a record for an upload that is just starting.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        FileRecord {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            size,
            storage_key: String::new(),
            upload_progress: 0,
            status: FileStatus::Uploading,
            job_id: None,
            error: None,
            uploaded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = FileRecord::new("report.csv", 1024);
        assert_eq!(record.name, "report.csv");
        assert_eq!(record.size, 1024);
        assert_eq!(record.status, FileStatus::Uploading);
        assert_eq!(record.upload_progress, 0);
        assert!(record.storage_key.is_empty());
        assert!(record.job_id.is_none());
        assert!(record.error.is_none());
    }

    #[test]
    fn test_serialization_shape() {
        let record = FileRecord::new("report.csv", 2048);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["name"], "report.csv");
        assert_eq!(json["status"], "uploading");
        assert_eq!(json["storageKey"], "");
        assert_eq!(json["uploadProgress"], 0);
        // Unset backrefs are omitted entirely.
        assert!(json.get("jobId").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(FileStatus::Uploaded.to_string(), "uploaded");
        assert_eq!(FileStatus::Error.to_string(), "error");
    }
}
