//! Movie catalog use cases.
//!
//! Wraps the movie repository and poster storage so that a row and the poster
//! file it points at are created, replaced and removed together.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Movie, MovieChanges, NewMovie, Page, PageRequest, PosterUpload};
use crate::error::{DomainError, RepoError};
use crate::ports::{MovieRepository, PosterStorage};

/// Movie access layer.
#[derive(Clone)]
pub struct MovieCatalog {
    movies: Arc<dyn MovieRepository>,
    posters: Arc<dyn PosterStorage>,
}

impl MovieCatalog {
    pub fn new(movies: Arc<dyn MovieRepository>, posters: Arc<dyn PosterStorage>) -> Self {
        Self { movies, posters }
    }

    /// Store the poster (if any), then insert the row.
    ///
    /// A poster written for a row that fails to insert is removed again.
    pub async fn create(
        &self,
        draft: NewMovie,
        poster: Option<PosterUpload>,
    ) -> Result<Movie, DomainError> {
        let poster_url = match &poster {
            Some(upload) => Some(self.posters.store(upload).await?),
            None => None,
        };

        let movie = Movie::new(draft, poster_url.clone());
        match self.movies.insert(movie).await {
            Ok(saved) => {
                tracing::info!(movie_id = %saved.id, title = %saved.title, "Movie created");
                Ok(saved)
            }
            Err(err) => {
                self.discard_poster(poster_url.as_deref()).await;
                Err(err.into())
            }
        }
    }

    pub async fn list(&self, request: PageRequest) -> Result<Page<Movie>, DomainError> {
        Ok(self.movies.list(request).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Movie, DomainError> {
        self.movies
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::movie_not_found(id))
    }

    /// Merge `changes` onto an existing movie, replacing its poster when one is uploaded.
    pub async fn update(
        &self,
        id: Uuid,
        changes: MovieChanges,
        poster: Option<PosterUpload>,
    ) -> Result<Movie, DomainError> {
        let changes = changes.validated()?;
        let mut movie = self.get(id).await?;
        let previous_poster = movie.poster_url.clone();

        let poster_url = match &poster {
            Some(upload) => Some(self.posters.store(upload).await?),
            None => None,
        };

        movie.apply(changes, poster_url.clone());
        let saved = match self.movies.update(movie).await {
            Ok(saved) => saved,
            Err(err) => {
                self.discard_poster(poster_url.as_deref()).await;
                return Err(match err {
                    RepoError::NotFound => DomainError::movie_not_found(id),
                    other => other.into(),
                });
            }
        };

        if poster_url.is_some() && previous_poster != poster_url {
            self.discard_poster(previous_poster.as_deref()).await;
        }

        tracing::info!(movie_id = %saved.id, "Movie updated");
        Ok(saved)
    }

    /// Delete the row and the poster file it references.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let movie = self.get(id).await?;
        self.movies.delete(id).await.map_err(|err| match err {
            RepoError::NotFound => DomainError::movie_not_found(id),
            other => other.into(),
        })?;
        self.discard_poster(movie.poster_url.as_deref()).await;

        tracing::info!(movie_id = %id, "Movie deleted");
        Ok(())
    }

    /// Movies whose title contains `query` as given, ignoring case.
    pub async fn search(&self, query: &str) -> Result<Vec<Movie>, DomainError> {
        Ok(self.movies.search_by_title(query).await?)
    }

    async fn discard_poster(&self, reference: Option<&str>) {
        let Some(reference) = reference else {
            return;
        };
        if let Err(err) = self.posters.remove(reference).await {
            tracing::warn!(poster = %reference, error = %err, "Failed to remove poster file");
        }
    }
}
