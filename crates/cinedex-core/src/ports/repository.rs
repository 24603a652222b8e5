use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Movie, Page, PageRequest, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `RepoError::NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Movie repository. Listings are ordered newest first.
#[async_trait]
pub trait MovieRepository: BaseRepository<Movie, Uuid> {
    /// Fetch one page ordered by creation time, descending.
    async fn list(&self, request: PageRequest) -> Result<Page<Movie>, RepoError>;

    /// Case-insensitive substring match on the title, newest first.
    async fn search_by_title(&self, query: &str) -> Result<Vec<Movie>, RepoError>;
}
