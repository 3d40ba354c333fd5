//! Request and response types for the backend contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::table::DataRow;

/// Acknowledgement that extraction started for a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    pub job_id: String,
}

/// Extracted table for one file, as returned by the backend. The client
/// wraps this into a [`crate::data::TableData`] with dirty-row tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    pub columns: Vec<String>,
    pub rows: Vec<DataRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationFormat {
    Pdf,
    Pptx,
}

impl std::fmt::Display for PresentationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresentationFormat::Pdf => write!(f, "pdf"),
            PresentationFormat::Pptx => write!(f, "pptx"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationRequest {
    pub job_id: String,
    pub format: PresentationFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationResponse {
    pub download_url: String,
}

/// Natural-language question over one or more files' extracted data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<String>>,
}

impl QaRequest {
    pub fn new(question: impl Into<String>) -> Self {
        QaRequest {
            question: question.into(),
            file_ids: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaSource {
    pub file_id: String,
    pub file_name: String,
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaResponse {
    pub answer: String,
    pub sources: Vec<QaSource>,
    pub timestamp: DateTime<Utc>,
}

/// Profile returned at login and reconstructed from token claims on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_format_display() {
        assert_eq!(PresentationFormat::Pdf.to_string(), "pdf");
        assert_eq!(PresentationFormat::Pptx.to_string(), "pptx");
    }

    #[test]
    fn test_qa_request_shape() {
        let request = QaRequest {
            question: "total revenue?".to_string(),
            file_ids: Some(vec!["file-1".to_string()]),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["question"], "total revenue?");
        assert_eq!(json["fileIds"][0], "file-1");

        let bare = QaRequest::new("anything");
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("fileIds").is_none());
    }

    #[test]
    fn test_login_response_roundtrip() {
        let response = LoginResponse {
            token: "abc.def.ghi".to_string(),
            user: User {
                id: "1".to_string(),
                email: "user@example.com".to_string(),
                name: Some("Demo User".to_string()),
            },
        };
        let text = serde_json::to_string(&response).unwrap();
        assert!(text.contains("\"token\""));
        let back: LoginResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(back, response);
    }
}
