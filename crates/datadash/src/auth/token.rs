//! Inspection of the persisted session token.
//!
//! Tokens are the familiar three-segment `header.payload.signature` layout
//! with a base64url payload. The client never verifies signatures; it only
//! reads the claims to restore a session and to check expiry.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

const HEADER: &[u8] = br#"{"alg":"HS256","typ":"JWT"}"#;
const SIGNATURE: &str = "mock-signature";

/// Claims carried in the payload segment of a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Some issuers put the identifier here instead of `sub`.
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

impl TokenClaims {
    /// The user identifier, whichever claim carries it.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().or(self.user_id.as_deref())
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Extracts the claims from a token without verifying its signature.
pub fn decode_token(token: &str) -> Result<TokenClaims, AuthError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(AuthError::MalformedToken {
            reason: format!("expected 3 segments, found {}", segments.len()),
        });
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1])
        .map_err(|e| AuthError::MalformedToken {
            reason: format!("payload is not valid base64: {}", e),
        })?;

    serde_json::from_slice(&payload).map_err(|e| AuthError::MalformedToken {
        reason: format!("payload is not valid JSON: {}", e),
    })
}

/// Assembles a token from claims, with a placeholder signature.
///
/// Only the mock backend mints tokens client side; a real deployment issues
/// signed ones from the server.
pub fn encode_token(claims: &TokenClaims) -> Result<String, AuthError> {
    let payload = serde_json::to_vec(claims)?;
    Ok(format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(HEADER),
        URL_SAFE_NO_PAD.encode(payload),
        SIGNATURE
    ))
}
