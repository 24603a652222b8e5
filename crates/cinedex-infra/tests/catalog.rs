//! Movie catalog behaviour over the in-memory repository and local poster storage.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use cinedex_core::DomainError;
use cinedex_core::domain::{Movie, MovieChanges, NewMovie, Page, PageRequest, PosterUpload};
use cinedex_core::error::RepoError;
use cinedex_core::ports::{BaseRepository, MovieRepository};
use cinedex_core::services::MovieCatalog;
use cinedex_infra::{InMemoryMovieRepository, LocalPosterStorage};
use tempfile::TempDir;

struct Fixture {
    catalog: MovieCatalog,
    repo: Arc<InMemoryMovieRepository>,
    dir: TempDir,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(InMemoryMovieRepository::new());
    let storage = Arc::new(LocalPosterStorage::new(dir.path()));
    Fixture {
        catalog: MovieCatalog::new(repo.clone(), storage),
        repo,
        dir,
    }
}

/// Reads go to the wrapped repository; every write fails.
struct ReadOnlyMovies(Arc<InMemoryMovieRepository>);

#[async_trait]
impl BaseRepository<Movie, Uuid> for ReadOnlyMovies {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, RepoError> {
        self.0.find_by_id(id).await
    }

    async fn insert(&self, _entity: Movie) -> Result<Movie, RepoError> {
        Err(RepoError::Query("connection reset".to_string()))
    }

    async fn update(&self, _entity: Movie) -> Result<Movie, RepoError> {
        Err(RepoError::Query("connection reset".to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.0.delete(id).await
    }
}

#[async_trait]
impl MovieRepository for ReadOnlyMovies {
    async fn list(&self, request: PageRequest) -> Result<Page<Movie>, RepoError> {
        self.0.list(request).await
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Movie>, RepoError> {
        self.0.search_by_title(query).await
    }
}

fn poster(name: &str) -> PosterUpload {
    PosterUpload::new(name, vec![0xff, 0xd8, 0xff]).unwrap()
}

fn poster_file(dir: &Path, reference: &str) -> std::path::PathBuf {
    dir.join(reference.rsplit('/').next().unwrap())
}

fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[tokio::test]
async fn create_then_get_returns_same_fields() {
    let fx = fixture();

    let created = fx
        .catalog
        .create(NewMovie::new("Dune", 2021).unwrap(), Some(poster("dune.jpg")))
        .await
        .unwrap();

    let reference = created.poster_url.clone().unwrap();
    assert!(reference.starts_with("/uploads/posters/"));
    assert!(poster_file(fx.dir.path(), &reference).exists());

    let fetched = fx.catalog.get(created.id).await.unwrap();
    assert_eq!(fetched.title, "Dune");
    assert_eq!(fetched.release_year, 2021);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_without_poster_keeps_other_fields() {
    let fx = fixture();
    let created = fx
        .catalog
        .create(NewMovie::new("Arrival", 2016).unwrap(), Some(poster("a.png")))
        .await
        .unwrap();

    let updated = fx
        .catalog
        .update(
            created.id,
            MovieChanges {
                title: Some("X".to_string()),
                release_year: None,
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "X");
    assert_eq!(updated.release_year, 2016);
    assert_eq!(updated.poster_url, created.poster_url);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_posterless_movie_without_poster() {
    let fx = fixture();
    let created = fx
        .catalog
        .create(NewMovie::new("Heat", 1995).unwrap(), None)
        .await
        .unwrap();

    let updated = fx
        .catalog
        .update(
            created.id,
            MovieChanges {
                title: None,
                release_year: Some(1996),
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(updated.release_year, 1996);
    assert_eq!(updated.poster_url, None);
}

#[tokio::test]
async fn replacing_poster_removes_old_file() {
    let fx = fixture();
    let created = fx
        .catalog
        .create(NewMovie::new("Alien", 1979).unwrap(), Some(poster("old.jpg")))
        .await
        .unwrap();
    let old = created.poster_url.clone().unwrap();

    let updated = fx
        .catalog
        .update(created.id, MovieChanges::default(), Some(poster("new.gif")))
        .await
        .unwrap();
    let new = updated.poster_url.clone().unwrap();

    assert_ne!(old, new);
    assert!(new.ends_with(".gif"));
    assert!(!poster_file(fx.dir.path(), &old).exists());
    assert!(poster_file(fx.dir.path(), &new).exists());
}

#[tokio::test]
async fn invalid_year_writes_nothing() {
    let fx = fixture();

    let err = NewMovie::new("Too Old", 1700).unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let created = fx
        .catalog
        .create(NewMovie::new("Fine", 2000).unwrap(), None)
        .await
        .unwrap();
    let err = fx
        .catalog
        .update(
            created.id,
            MovieChanges {
                title: None,
                release_year: Some(1700),
            },
            Some(poster("p.jpg")),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(file_count(fx.dir.path()), 0);
    assert_eq!(fx.catalog.get(created.id).await.unwrap().release_year, 2000);
}

#[tokio::test]
async fn update_missing_movie_is_not_found() {
    let fx = fixture();

    let err = fx
        .catalog
        .update(uuid::Uuid::new_v4(), MovieChanges::default(), Some(poster("p.jpg")))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(file_count(fx.dir.path()), 0);
}

#[tokio::test]
async fn delete_then_get_is_not_found_and_poster_removed() {
    let fx = fixture();
    let created = fx
        .catalog
        .create(NewMovie::new("Jaws", 1975).unwrap(), Some(poster("jaws.webp")))
        .await
        .unwrap();
    let reference = created.poster_url.clone().unwrap();

    fx.catalog.delete(created.id).await.unwrap();

    assert!(matches!(
        fx.catalog.get(created.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        fx.catalog.delete(created.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(!poster_file(fx.dir.path(), &reference).exists());
}

#[tokio::test]
async fn pages_sum_to_total_and_search_empty_returns_all() {
    let fx = fixture();
    for i in 0..7 {
        fx.catalog
            .create(NewMovie::new(format!("Movie {i}"), 2000 + i).unwrap(), None)
            .await
            .unwrap();
    }

    let first = fx.catalog.list(PageRequest::new(1, 3).unwrap()).await.unwrap();
    assert_eq!(first.total, 7);
    assert_eq!(first.total_pages, 3);

    let mut rows = 0;
    for page in 1..=first.total_pages {
        rows += fx
            .catalog
            .list(PageRequest::new(page, 3).unwrap())
            .await
            .unwrap()
            .items
            .len();
    }
    assert_eq!(rows as u64, first.total);

    let all = fx.catalog.search("").await.unwrap();
    assert_eq!(all.len(), 7);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let listed = fx.repo.list(PageRequest::new(1, 100).unwrap()).await.unwrap();
    assert_eq!(
        all.iter().map(|m| m.id).collect::<Vec<_>>(),
        listed.items.iter().map(|m| m.id).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn failed_insert_removes_stored_poster() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(ReadOnlyMovies(Arc::new(InMemoryMovieRepository::new())));
    let catalog = MovieCatalog::new(repo, Arc::new(LocalPosterStorage::new(dir.path())));

    let err = catalog
        .create(NewMovie::new("Dune", 2021).unwrap(), Some(poster("dune.jpg")))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Repository(RepoError::Query(_))));
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn failed_update_removes_new_poster_and_keeps_old() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalPosterStorage::new(dir.path()));
    let inner = Arc::new(InMemoryMovieRepository::new());

    let seeded = MovieCatalog::new(inner.clone(), storage.clone())
        .create(NewMovie::new("Alien", 1979).unwrap(), Some(poster("old.jpg")))
        .await
        .unwrap();
    let old = seeded.poster_url.clone().unwrap();

    let catalog = MovieCatalog::new(Arc::new(ReadOnlyMovies(inner)), storage);
    let err = catalog
        .update(seeded.id, MovieChanges::default(), Some(poster("new.png")))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Repository(RepoError::Query(_))));
    assert_eq!(file_count(dir.path()), 1);
    assert!(poster_file(dir.path(), &old).exists());
    assert_eq!(catalog.get(seeded.id).await.unwrap(), seeded);
}

#[tokio::test]
async fn search_matches_query_as_given() {
    let fx = fixture();
    for title in ["Dune", "Dune Part Two"] {
        fx.catalog
            .create(NewMovie::new(title, 2021).unwrap(), None)
            .await
            .unwrap();
    }

    let found = fx.catalog.search("dune ").await.unwrap();
    let titles: Vec<_> = found.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune Part Two"]);

    assert_eq!(fx.catalog.search(" ").await.unwrap().len(), 1);
}
