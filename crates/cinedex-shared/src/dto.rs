//! Data Transfer Objects - request/response types for the API.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Multipart field names used by `POST /movies` and `PATCH /movies/{id}`.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const RELEASE_YEAR: &str = "releaseYear";
    pub const POSTER: &str = "poster";
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// A user's public information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: Uuid,
    pub title: String,
    pub release_year: i32,
    #[serde(default)]
    pub poster_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pagination envelope for `GET /movies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

/// Query string of `GET /movies`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMoviesQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Query string of `GET /movies/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_uses_camel_case() {
        let movie = MovieResponse {
            id: Uuid::nil(),
            title: "Dune".to_string(),
            release_year: 2021,
            poster_url: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        };

        let json = serde_json::to_value(&movie).unwrap();

        assert_eq!(json["releaseYear"], 2021);
        assert!(json["posterUrl"].is_null());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_register_optional_names() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"demo","email":"demo@demo.com","password":"demo123","firstName":"Demo"}"#,
        )
        .unwrap();

        assert_eq!(req.first_name.as_deref(), Some("Demo"));
        assert_eq!(req.last_name, None);
    }

    #[test]
    fn test_envelope_field_names() {
        let page = PaginatedResponse::<u8> {
            data: vec![],
            total: 0,
            page: 1,
            total_pages: 0,
        };
        let json = serde_json::to_string(&page).unwrap();
        assert_eq!(json, r#"{"data":[],"total":0,"page":1,"totalPages":0}"#);
    }
}
