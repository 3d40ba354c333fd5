//! On-disk persistence of the session token.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const APP_DIR: &str = "datadash";
const TOKEN_FILE: &str = "auth_token";

/// Stores the raw token string in a file under the platform config
/// directory, so a session survives process restarts.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new() -> Result<Self, AuthError> {
        let dir = dirs::config_dir().ok_or(AuthError::NoConfigDir)?;
        Ok(TokenStore {
            path: dir.join(APP_DIR).join(TOKEN_FILE),
        })
    }

    /// Uses an explicit file path instead of the platform default.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, token: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AuthError::WriteToken {
                path: self.path.clone(),
                source: e,
            })?;
        }
        fs::write(&self.path, token).map_err(|e| AuthError::WriteToken {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Reads the persisted token. A missing or empty file is `None`.
    pub fn load(&self) -> Result<Option<String>, AuthError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::ReadToken {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Deletes the persisted token. Succeeds when there was none.
    pub fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::WriteToken {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}
