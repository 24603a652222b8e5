//! Local-disk poster storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use cinedex_core::domain::{POSTER_URL_PREFIX, PosterUpload};
use cinedex_core::error::StorageError;
use cinedex_core::ports::PosterStorage;

const CREATE_ATTEMPTS: usize = 3;

/// Writes posters into a single directory served under `/uploads/posters`.
#[derive(Debug, Clone)]
pub struct LocalPosterStorage {
    root: PathBuf,
}

impl LocalPosterStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the poster files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// `poster-<unix millis>-<random>.<ext>`
    fn generate_name(extension: &str) -> String {
        let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
        format!(
            "poster-{}-{}.{}",
            Utc::now().timestamp_millis(),
            suffix,
            extension
        )
    }

    /// Map a public reference back to a file in `root`, refusing anything that
    /// could escape the directory.
    fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let name = reference
            .strip_prefix(POSTER_URL_PREFIX)?
            .strip_prefix('/')?;
        let is_plain_name = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        is_plain_name.then(|| self.root.join(name))
    }
}

#[async_trait]
impl PosterStorage for LocalPosterStorage {
    async fn store(&self, poster: &PosterUpload) -> Result<String, StorageError> {
        self.ensure_root().await?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let name = Self::generate_name(poster.extension());
            let path = self.root.join(&name);

            // create_new never clobbers another upload's file.
            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists && attempt < CREATE_ATTEMPTS => {
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            if let Err(err) = write_all(&mut file, poster.bytes()).await {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(err.into());
            }

            tracing::debug!(
                poster = %name,
                bytes = poster.bytes().len(),
                original = %poster.file_name(),
                "Poster stored"
            );
            return Ok(format!("{POSTER_URL_PREFIX}/{name}"));
        }
    }

    async fn remove(&self, reference: &str) -> Result<(), StorageError> {
        let Some(path) = self.resolve(reference) else {
            tracing::debug!(poster = %reference, "Ignoring foreign poster reference");
            return Ok(());
        };

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

async fn write_all(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}
