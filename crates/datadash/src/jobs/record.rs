//! Job record representing one extraction task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle states of an extraction job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Whether the job has reached a terminal state (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client-side view of one extraction job, replaced wholesale on every
/// status check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    /// Back-reference to the originating file record (non-owning).
    pub file_id: String,
    pub status: JobStatus,
    /// Percentage 0-100, non-decreasing while the job is processing.
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Creates a fresh record for a file, not yet picked up by the backend.
    pub fn new(file_id: impl Into<String>) -> Self {
        let now = Utc::now();
        JobRecord {
            id: Uuid::new_v4().to_string(),
            file_id: file_id.into(),
            status: JobStatus::Pending,
            progress: 0,
            message: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a record already in the given state, keeping both timestamps
    /// at the current instant.
    pub fn with_status(
        file_id: impl Into<String>,
        status: JobStatus,
        progress: u8,
        message: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        JobRecord {
            id: Uuid::new_v4().to_string(),
            file_id: file_id.into(),
            status,
            progress,
            message: Some(message.into()),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
