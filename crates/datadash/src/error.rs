use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatadashError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors surfaced by the backend collaborator.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Job not found: {job_id}")]
    JobNotFound { job_id: String },

    #[error("Data not found for file: {file_id}")]
    DataNotFound { file_id: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Backend not configured")]
    BackendUnavailable,

    #[error("Network failure: {0}")]
    Network(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to upload '{name}': {reason}")]
    UploadFailed { name: String, reason: String },

    #[error("Failed to delete object '{key}': {reason}")]
    DeleteFailed { key: String, reason: String },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Malformed token: {reason}")]
    MalformedToken { reason: String },

    #[error("Failed to serialize token claims: {0}")]
    SerializeClaims(#[from] serde_json::Error),

    #[error("Failed to read token file '{path}': {source}")]
    ReadToken {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write token file '{path}': {source}")]
    WriteToken {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No platform config directory available for the token file")]
    NoConfigDir,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

pub type Result<T> = std::result::Result<T, DatadashError>;
