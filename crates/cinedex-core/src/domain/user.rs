use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const MIN_PASSWORD_CHARS: usize = 6;

/// User entity - an authentication principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(registration: Registration, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: registration.username,
            email: registration.email,
            password_hash,
            first_name: registration.first_name,
            last_name: registration.last_name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Sign-up input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Registration {
    /// Trim the text fields and check the sign-up rules.
    pub fn validated(self) -> Result<Self, DomainError> {
        let username = self.username.trim().to_string();
        let email = self.email.trim().to_string();

        if username.is_empty() {
            return Err(DomainError::validation("Username is required"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("Invalid email address"));
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(DomainError::validation(format!(
                "Password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }

        Ok(Self {
            username,
            email,
            password: self.password,
            first_name: non_blank(self.first_name),
            last_name: non_blank(self.last_name),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A verified user together with the bearer token issued for it.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}
