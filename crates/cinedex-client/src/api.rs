//! HTTP access to the Cinedex API.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use uuid::Uuid;

use cinedex_shared::ErrorResponse;
use cinedex_shared::dto::{
    AuthResponse, LoginRequest, MovieResponse, PaginatedResponse, RegisterRequest, fields,
};

use crate::error::ClientError;
use crate::session::AuthState;

/// Fields of a movie to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub release_year: i32,
}

/// Fields to change on an existing movie. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub release_year: Option<i32>,
}

/// An image picked by the user, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterFile {
    pub file_name: String,
    /// MIME type reported by the picker, e.g. `image/jpeg`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PosterFile {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    #[serde(default)]
    pub backend: Option<String>,
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ClientError>;

    async fn register(&self, data: &RegisterRequest) -> Result<AuthResponse, ClientError>;
}

#[async_trait]
pub trait MovieApi: Send + Sync {
    async fn list(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<PaginatedResponse<MovieResponse>, ClientError>;

    async fn get(&self, id: Uuid) -> Result<MovieResponse, ClientError>;

    async fn create(
        &self,
        movie: &MovieDraft,
        poster: Option<&PosterFile>,
    ) -> Result<MovieResponse, ClientError>;

    async fn update(
        &self,
        id: Uuid,
        changes: &MovieUpdate,
        poster: Option<&PosterFile>,
    ) -> Result<MovieResponse, ClientError>;

    async fn delete(&self, id: Uuid) -> Result<(), ClientError>;

    async fn search(&self, query: &str) -> Result<Vec<MovieResponse>, ClientError>;
}

/// reqwest-backed API client.
///
/// Requests carry `Authorization: Bearer <token>` whenever the attached
/// session (see [`ApiClient::with_session`]) holds a token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Option<watch::Receiver<AuthState>>,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create with a custom reqwest [`Client`] (for timeouts, proxies, etc.).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            client,
            base_url: base.trim_end_matches('/').to_string(),
            session: None,
        }
    }

    /// Attach the token of a session store to every request.
    pub fn with_session(mut self, session: watch::Receiver<AuthState>) -> Self {
        self.session = Some(session);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL of a stored poster, given the `posterUrl` of a movie.
    pub fn poster_url(&self, reference: &str) -> String {
        self.url(reference)
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.send(self.client.get(self.url("/health"))).await
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let token = self
            .session
            .as_ref()
            .and_then(|session| session.borrow().token.clone());
        match token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = checked(self.authorize(req).send().await?).await?;
        Ok(resp.json().await?)
    }

    async fn send_empty(&self, req: RequestBuilder) -> Result<(), ClientError> {
        checked(self.authorize(req).send().await?).await?;
        Ok(())
    }
}

/// Turn a non-success response into [`ClientError::Api`].
async fn checked(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.bytes().await.unwrap_or_default();
    let err = api_error(status.as_u16(), &body);
    tracing::debug!(status = status.as_u16(), error = %err, "API request failed");
    Err(err)
}

fn api_error(status: u16, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .map(|problem| problem.message().to_string());
    ClientError::Api { status, message }
}

fn poster_part(poster: &PosterFile) -> Result<Part, ClientError> {
    Ok(Part::bytes(poster.bytes.clone())
        .file_name(poster.file_name.clone())
        .mime_str(&poster.content_type)?)
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ClientError> {
        self.send(self.client.post(self.url("/auth/login")).json(credentials))
            .await
    }

    async fn register(&self, data: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        self.send(self.client.post(self.url("/auth/register")).json(data))
            .await
    }
}

#[async_trait]
impl MovieApi for ApiClient {
    async fn list(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<PaginatedResponse<MovieResponse>, ClientError> {
        let req = self
            .client
            .get(self.url("/movies"))
            .query(&[("page", page), ("limit", limit)]);
        self.send(req).await
    }

    async fn get(&self, id: Uuid) -> Result<MovieResponse, ClientError> {
        self.send(self.client.get(self.url(&format!("/movies/{id}"))))
            .await
    }

    async fn create(
        &self,
        movie: &MovieDraft,
        poster: Option<&PosterFile>,
    ) -> Result<MovieResponse, ClientError> {
        let mut form = Form::new()
            .text(fields::TITLE, movie.title.clone())
            .text(fields::RELEASE_YEAR, movie.release_year.to_string());
        if let Some(poster) = poster {
            form = form.part(fields::POSTER, poster_part(poster)?);
        }

        self.send(self.client.post(self.url("/movies")).multipart(form))
            .await
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &MovieUpdate,
        poster: Option<&PosterFile>,
    ) -> Result<MovieResponse, ClientError> {
        let mut form = Form::new();
        if let Some(title) = &changes.title {
            form = form.text(fields::TITLE, title.clone());
        }
        if let Some(year) = changes.release_year {
            form = form.text(fields::RELEASE_YEAR, year.to_string());
        }
        if let Some(poster) = poster {
            form = form.part(fields::POSTER, poster_part(poster)?);
        }

        let req = self
            .client
            .patch(self.url(&format!("/movies/{id}")))
            .multipart(form);
        self.send(req).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.send_empty(self.client.delete(self.url(&format!("/movies/{id}"))))
            .await
    }

    async fn search(&self, query: &str) -> Result<Vec<MovieResponse>, ClientError> {
        let req = self
            .client
            .get(self.url("/movies/search"))
            .query(&[("q", query)]);
        self.send(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let api = ApiClient::new("http://localhost:8080/");
        assert_eq!(api.url("/movies"), "http://localhost:8080/movies");
        assert_eq!(
            api.poster_url("/uploads/posters/poster-1-2.jpg"),
            "http://localhost:8080/uploads/posters/poster-1-2.jpg"
        );
    }

    #[test]
    fn test_api_error_reads_problem_detail() {
        let body = br#"{"type":"about:blank","title":"Bad Request","status":400,"detail":"Title is required"}"#;
        let err = api_error(400, body);
        assert_eq!(err.server_message(), Some("Title is required"));

        let err = api_error(500, b"<html>oops</html>");
        assert_eq!(err.server_message(), None);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_session_token_is_attached() {
        let (tx, rx) = watch::channel(AuthState::default());
        let api = ApiClient::new("http://localhost:8080").with_session(rx);

        let req = api
            .authorize(api.client.get(api.url("/movies")))
            .build()
            .unwrap();
        assert!(req.headers().get("authorization").is_none());

        tx.send_modify(|state| state.token = Some("abc".to_string()));
        let req = api
            .authorize(api.client.get(api.url("/movies")))
            .build()
            .unwrap();
        assert_eq!(req.headers()["authorization"], "Bearer abc");
    }

    #[test]
    fn test_poster_is_image() {
        let poster = PosterFile {
            file_name: "dune.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![],
        };
        assert!(poster.is_image());
        assert!(
            !PosterFile {
                content_type: "text/plain".to_string(),
                ..poster
            }
            .is_image()
        );
    }
}
