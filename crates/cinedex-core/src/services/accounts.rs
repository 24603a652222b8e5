//! Sign-up and sign-in.

use std::sync::Arc;

use crate::domain::{AuthSession, Registration, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthError, PasswordService, TokenService, UserRepository};

/// Account use cases: registration and credential login.
#[derive(Clone)]
pub struct Accounts {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl Accounts {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Create a user and issue a token for it. The email must not be taken.
    pub async fn register(&self, registration: Registration) -> Result<AuthSession, DomainError> {
        let registration = registration.validated()?;

        if self
            .users
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(DomainError::Duplicate("Email already registered".to_string()));
        }

        let password_hash = self.passwords.hash(&registration.password)?;
        let user = self
            .users
            .insert(User::new(registration, password_hash))
            .await
            .map_err(|err| match err {
                RepoError::Constraint(_) => {
                    DomainError::Duplicate("Email already registered".to_string())
                }
                other => other.into(),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        self.issue(user)
    }

    /// Verify credentials and issue a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, DomainError> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::debug!(user_id = %user.id, "User logged in");
        self.issue(user)
    }

    fn issue(&self, user: User) -> Result<AuthSession, DomainError> {
        let token = self
            .tokens
            .generate_token(user.id, &user.email, &user.username)?;
        Ok(AuthSession { user, token })
    }
}
