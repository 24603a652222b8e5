use async_trait::async_trait;

use crate::domain::PosterUpload;
use crate::error::StorageError;

/// Storage for uploaded poster files.
#[async_trait]
pub trait PosterStorage: Send + Sync {
    /// Persist an accepted upload under a fresh unique name and return its public path.
    async fn store(&self, poster: &PosterUpload) -> Result<String, StorageError>;

    /// Remove a previously stored poster. References this store did not issue are ignored.
    async fn remove(&self, reference: &str) -> Result<(), StorageError>;
}
