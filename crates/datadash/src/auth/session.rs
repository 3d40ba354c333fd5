//! Login state, restored across restarts from the persisted token.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::api::client::BackendClient;
use crate::api::types::User;
use crate::auth::store::TokenStore;
use crate::auth::token::decode_token;
use crate::error::Result;

/// Authenticated user plus their token, kept in memory and mirrored to the
/// [`TokenStore`].
pub struct AuthSession {
    api: Arc<dyn BackendClient>,
    store: TokenStore,
    user: RwLock<Option<User>>,
    token: RwLock<Option<String>>,
}

impl AuthSession {
    pub fn new(api: Arc<dyn BackendClient>, store: TokenStore) -> Self {
        AuthSession {
            api,
            store,
            user: RwLock::new(None),
            token: RwLock::new(None),
        }
    }

    /// Authenticates against the backend and persists the returned token.
    ///
    /// A failure to persist does not fail the login; the session simply will
    /// not survive a restart.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let response = self.api.login(email, password).await?;

        if let Err(e) = self.store.save(&response.token) {
            log::warn!("Session will not survive a restart: {}", e);
        }

        *self.write_token() = Some(response.token);
        *self.write_user() = Some(response.user.clone());
        log::info!("Logged in as {}", response.user.email);
        Ok(response.user)
    }

    /// Rebuilds the session from the persisted token, if it is still valid.
    ///
    /// An expired or undecodable token logs the session out, which also
    /// removes the persisted file.
    pub fn restore(&self) -> Option<User> {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read persisted token: {}", e);
                return None;
            }
        };

        let claims = match decode_token(&token) {
            Ok(claims) => claims,
            Err(e) => {
                log::warn!("Discarding persisted token: {}", e);
                self.logout();
                return None;
            }
        };

        if claims.is_expired() {
            log::info!("Persisted token expired; logging out");
            self.logout();
            return None;
        }

        let id = match claims.subject() {
            Some(id) => id.to_string(),
            None => {
                log::warn!("Persisted token carries no user identifier; logging out");
                self.logout();
                return None;
            }
        };

        let user = User {
            id,
            email: claims.email.clone().unwrap_or_default(),
            name: claims.name.clone(),
        };

        *self.write_token() = Some(token);
        *self.write_user() = Some(user.clone());
        log::info!("Restored session for {}", user.email);
        Some(user)
    }

    /// Forgets the user and token, in memory and on disk.
    pub fn logout(&self) {
        *self.write_user() = None;
        *self.write_token() = None;
        if let Err(e) = self.store.clear() {
            log::warn!("Could not remove persisted token: {}", e);
        }
        log::info!("Logged out");
    }

    pub fn current_user(&self) -> Option<User> {
        self.read_user().clone()
    }

    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_user().is_some()
    }

    fn read_user(&self) -> RwLockReadGuard<'_, Option<User>> {
        match self.user.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_user(&self) -> RwLockWriteGuard<'_, Option<User>> {
        match self.user.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_token(&self) -> RwLockWriteGuard<'_, Option<String>> {
        match self.token.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    use crate::api::mock::MockBackend;
    use crate::auth::token::{encode_token, TokenClaims};
    use crate::error::{ApiError, DatadashError};

    fn session_at(dir: &std::path::Path) -> AuthSession {
        AuthSession::new(
            Arc::new(MockBackend::without_latency()),
            TokenStore::at(dir.join("auth_token")),
        )
    }

    #[tokio::test]
    async fn test_login_stores_and_persists() {
        let dir = tempdir().unwrap();
        let session = session_at(dir.path());

        let user = session.login("user@example.com", "secret").await.unwrap();
        assert_eq!(user.id, "1");
        assert!(session.is_authenticated());
        assert_eq!(session.current_user().unwrap().email, "user@example.com");
        assert!(session.token().is_some());

        let persisted = TokenStore::at(dir.path().join("auth_token")).load().unwrap();
        assert_eq!(persisted, session.token());
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_clean() {
        let dir = tempdir().unwrap();
        let session = session_at(dir.path());

        let err = session.login("", "").await.unwrap_err();
        assert!(matches!(err, DatadashError::Api(ApiError::InvalidCredentials)));
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn test_restore_after_login() {
        let dir = tempdir().unwrap();
        session_at(dir.path())
            .login("user@example.com", "secret")
            .await
            .unwrap();

        let fresh = session_at(dir.path());
        let user = fresh.restore().unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.email, "user@example.com");
        assert!(fresh.is_authenticated());
    }

    #[test]
    fn test_restore_without_persisted_token() {
        let dir = tempdir().unwrap();
        let session = session_at(dir.path());
        assert!(session.restore().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_restore_expired_token_logs_out() {
        let dir = tempdir().unwrap();
        let claims = TokenClaims {
            sub: Some("1".to_string()),
            user_id: None,
            email: Some("user@example.com".to_string()),
            name: None,
            iat: None,
            exp: 1_000,
        };
        let store = TokenStore::at(dir.path().join("auth_token"));
        store.save(&encode_token(&claims).unwrap()).unwrap();

        let session = session_at(dir.path());
        assert!(session.restore().is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_restore_garbage_token_logs_out() {
        let dir = tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("auth_token"));
        store.save("definitely-not-a-token").unwrap();

        let session = session_at(dir.path());
        assert!(session.restore().is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_restore_accepts_user_id_claim() {
        let dir = tempdir().unwrap();
        let claims = TokenClaims {
            sub: None,
            user_id: Some("42".to_string()),
            email: Some("alt@example.com".to_string()),
            name: Some("Alt".to_string()),
            iat: None,
            exp: 9_999_999_999,
        };
        TokenStore::at(dir.path().join("auth_token"))
            .save(&encode_token(&claims).unwrap())
            .unwrap();

        let user = session_at(dir.path()).restore().unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.name.as_deref(), Some("Alt"));
    }

    #[test]
    fn test_restore_token_without_identity_logs_out() {
        let dir = tempdir().unwrap();
        let claims = TokenClaims {
            sub: None,
            user_id: None,
            email: Some("user@example.com".to_string()),
            name: None,
            iat: None,
            exp: 9_999_999_999,
        };
        let store = TokenStore::at(dir.path().join("auth_token"));
        store.save(&encode_token(&claims).unwrap()).unwrap();

        assert!(session_at(dir.path()).restore().is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let dir = tempdir().unwrap();
        let session = session_at(dir.path());
        session.login("user@example.com", "secret").await.unwrap();

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(TokenStore::at(dir.path().join("auth_token")).load().unwrap().is_none());
    }
}
