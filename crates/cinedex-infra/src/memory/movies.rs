use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use cinedex_core::domain::{Movie, Page, PageRequest};
use cinedex_core::error::RepoError;
use cinedex_core::ports::{BaseRepository, MovieRepository};

/// Movie repository backed by a HashMap behind an async RwLock.
#[derive(Default)]
pub struct InMemoryMovieRepository {
    store: RwLock<HashMap<Uuid, Movie>>,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first(movies: &mut [Movie]) {
        movies.sort_by_key(|m| Reverse((m.created_at, m.id)));
    }
}

#[async_trait]
impl BaseRepository<Movie, Uuid> for InMemoryMovieRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, movie: Movie) -> Result<Movie, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&movie.id) {
            return Err(RepoError::Constraint(format!(
                "movie {} already exists",
                movie.id
            )));
        }
        store.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn update(&self, movie: Movie) -> Result<Movie, RepoError> {
        let mut store = self.store.write().await;
        match store.get_mut(&movie.id) {
            Some(slot) => {
                *slot = movie.clone();
                Ok(movie)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn list(&self, request: PageRequest) -> Result<Page<Movie>, RepoError> {
        let mut all: Vec<Movie> = self.store.read().await.values().cloned().collect();
        Self::newest_first(&mut all);

        let total = all.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = all.into_iter().skip(offset).take(limit).collect();

        Ok(Page::new(items, total, request))
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Movie>, RepoError> {
        let needle = query.to_lowercase();
        let mut found: Vec<Movie> = self
            .store
            .read()
            .await
            .values()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Self::newest_first(&mut found);
        Ok(found)
    }
}
