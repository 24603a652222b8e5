//! Movie list store.

use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use cinedex_shared::dto::MovieResponse;

use crate::api::{MovieApi, MovieDraft, MovieUpdate, PosterFile};
use crate::error::ClientError;

/// Page size the list view asks for.
pub const DEFAULT_PAGE_SIZE: u64 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieState {
    pub movies: Vec<MovieResponse>,
    pub total: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for MovieState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            total: 0,
            current_page: 1,
            total_pages: 0,
            is_loading: false,
            error: None,
        }
    }
}

/// The movie list and the actions that change it.
///
/// Every action marks the state as loading, calls the API and then either
/// applies the result or records a message in `error`. Mutations also
/// return the error to the caller. Nothing is applied before the server
/// confirms it.
pub struct MovieStore {
    api: Arc<dyn MovieApi>,
    state: watch::Sender<MovieState>,
}

impl MovieStore {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        let (state, _) = watch::channel(MovieState::default());
        Self { api, state }
    }

    pub fn state(&self) -> MovieState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MovieState> {
        self.state.subscribe()
    }

    pub async fn fetch(&self, page: u64, limit: u64) {
        self.begin();
        match self.api.list(page, limit).await {
            Ok(result) => self.state.send_modify(|state| {
                state.movies = result.data;
                state.total = result.total;
                state.current_page = result.page;
                state.total_pages = result.total_pages;
                state.is_loading = false;
            }),
            Err(err) => self.fail(&err, "Failed to fetch movies"),
        }
    }

    /// Create a movie and append it to the current list.
    pub async fn add(
        &self,
        movie: &MovieDraft,
        poster: Option<&PosterFile>,
    ) -> Result<MovieResponse, ClientError> {
        self.begin();
        match self.api.create(movie, poster).await {
            Ok(created) => {
                self.state.send_modify(|state| {
                    state.movies.push(created.clone());
                    state.is_loading = false;
                });
                Ok(created)
            }
            Err(err) => {
                self.fail(&err, "Failed to add movie");
                Err(err)
            }
        }
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: &MovieUpdate,
        poster: Option<&PosterFile>,
    ) -> Result<MovieResponse, ClientError> {
        self.begin();
        match self.api.update(id, changes, poster).await {
            Ok(updated) => {
                self.state.send_modify(|state| {
                    for movie in state.movies.iter_mut().filter(|m| m.id == id) {
                        *movie = updated.clone();
                    }
                    state.is_loading = false;
                });
                Ok(updated)
            }
            Err(err) => {
                self.fail(&err, "Failed to update movie");
                Err(err)
            }
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.begin();
        match self.api.delete(id).await {
            Ok(()) => {
                self.state.send_modify(|state| {
                    state.movies.retain(|m| m.id != id);
                    state.is_loading = false;
                });
                Ok(())
            }
            Err(err) => {
                self.fail(&err, "Failed to delete movie");
                Err(err)
            }
        }
    }

    /// Replace the list with every movie whose title matches `query`.
    pub async fn search(&self, query: &str) {
        self.begin();
        match self.api.search(query).await {
            Ok(movies) => self.state.send_modify(|state| {
                state.movies = movies;
                state.is_loading = false;
            }),
            Err(err) => self.fail(&err, "Failed to search movies"),
        }
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
    }

    fn fail(&self, err: &ClientError, fallback: &str) {
        tracing::warn!(error = %err, "{fallback}");
        let message = err.user_message(fallback);
        self.state.send_modify(|state| {
            state.error = Some(message);
            state.is_loading = false;
        });
    }
}
