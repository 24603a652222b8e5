//! Signed-in session store.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::watch;

use cinedex_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use crate::api::AuthApi;
use crate::error::ClientError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<UserResponse>,
    pub token: Option<String>,
}

impl AuthState {
    fn signed_in(user: UserResponse, token: String) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
            token: Some(token),
        }
    }
}

/// Holds the current [`AuthState`] and writes it to a JSON file on every
/// change, so a restarted client comes back signed in.
pub struct AuthStore {
    api: Arc<dyn AuthApi>,
    state: watch::Sender<AuthState>,
    path: Option<PathBuf>,
}

impl AuthStore {
    /// A store that keeps the session in memory only.
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            api,
            state,
            path: None,
        }
    }

    /// A store persisted at `path`, restoring the session saved there.
    ///
    /// A missing file starts signed out. So does an unreadable one, after a warning.
    pub async fn open(
        api: Arc<dyn AuthApi>,
        path: impl Into<PathBuf>,
    ) -> Result<Self, ClientError> {
        let path = path.into();
        let restored = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Discarding unreadable session file"
                );
                AuthState::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => AuthState::default(),
            Err(err) => return Err(err.into()),
        };

        let (state, _) = watch::channel(restored);
        Ok(Self {
            api,
            state,
            path: Some(path),
        })
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = self.api.login(&credentials).await;
        self.finish(result, "Login failed").await
    }

    pub async fn register(&self, data: &RegisterRequest) -> Result<(), ClientError> {
        let result = self.api.register(data).await;
        self.finish(result, "Registration failed").await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.replace(AuthState::default()).await
    }

    /// Adopt a session obtained elsewhere.
    pub async fn set_auth(&self, user: UserResponse, token: String) -> Result<(), ClientError> {
        self.replace(AuthState::signed_in(user, token)).await
    }

    async fn finish(
        &self,
        result: Result<AuthResponse, ClientError>,
        action: &str,
    ) -> Result<(), ClientError> {
        match result {
            Ok(auth) => self.set_auth(auth.user, auth.token).await,
            Err(err) => {
                tracing::error!(error = %err, "{action}");
                self.replace(AuthState::default()).await?;
                Err(err)
            }
        }
    }

    async fn replace(&self, state: AuthState) -> Result<(), ClientError> {
        self.state.send_replace(state);
        self.persist().await
    }

    async fn persist(&self) -> Result<(), ClientError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_vec_pretty(&self.state())?;
        fs::write(path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tempfile::TempDir;
    use uuid::Uuid;

    use super::*;

    struct FakeAuth;

    fn demo_user() -> UserResponse {
        UserResponse {
            id: Uuid::nil(),
            username: "demo".to_string(),
            email: "demo@demo.com".to_string(),
            first_name: Some("Demo".to_string()),
            last_name: Some("User".to_string()),
        }
    }

    #[async_trait]
    impl AuthApi for FakeAuth {
        async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ClientError> {
            if credentials.password != "demo123" {
                return Err(ClientError::Api {
                    status: 401,
                    message: Some("Invalid email or password".to_string()),
                });
            }
            Ok(AuthResponse {
                user: demo_user(),
                token: "token-1".to_string(),
                expires_in: 86400,
            })
        }

        async fn register(&self, _data: &RegisterRequest) -> Result<AuthResponse, ClientError> {
            Err(ClientError::Api {
                status: 409,
                message: Some("Email already registered".to_string()),
            })
        }
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.json");

        let store = AuthStore::open(Arc::new(FakeAuth), &path).await.unwrap();
        assert!(!store.state().is_authenticated);

        store.login("demo@demo.com", "demo123").await.unwrap();
        assert!(store.state().is_authenticated);
        assert_eq!(store.state().token.as_deref(), Some("token-1"));

        let restored = AuthStore::open(Arc::new(FakeAuth), &path).await.unwrap();
        assert_eq!(restored.state(), store.state());
    }

    #[tokio::test]
    async fn test_failed_login_stays_signed_out() {
        let store = AuthStore::new(Arc::new(FakeAuth));

        let err = store.login("demo@demo.com", "nope").await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(store.state(), AuthState::default());
    }

    #[tokio::test]
    async fn test_register_conflict_is_returned() {
        let store = AuthStore::new(Arc::new(FakeAuth));
        let data = RegisterRequest {
            username: "demo".to_string(),
            email: "demo@demo.com".to_string(),
            password: "demo123".to_string(),
            first_name: None,
            last_name: None,
        };

        let err = store.register(&data).await.unwrap_err();

        assert_eq!(err.server_message(), Some("Email already registered"));
        assert!(!store.state().is_authenticated);
    }

    #[tokio::test]
    async fn test_logout_clears_saved_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.json");
        let store = AuthStore::open(Arc::new(FakeAuth), &path).await.unwrap();
        let mut changes = store.subscribe();

        store
            .set_auth(demo_user(), "token-2".to_string())
            .await
            .unwrap();
        assert!(changes.has_changed().unwrap());
        assert!(changes.borrow_and_update().is_authenticated);

        store.logout().await.unwrap();
        let restored = AuthStore::open(Arc::new(FakeAuth), &path).await.unwrap();
        assert_eq!(restored.state(), AuthState::default());
    }

    #[tokio::test]
    async fn test_corrupt_session_file_starts_signed_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.json");
        std::fs::write(&path, b"{not json").unwrap();

        let store = AuthStore::open(Arc::new(FakeAuth), &path).await.unwrap();

        assert_eq!(store.state(), AuthState::default());
    }
}
