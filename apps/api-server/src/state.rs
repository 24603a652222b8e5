//! Application state - shared across all handlers.

use std::sync::Arc;

use cinedex_core::ports::{MovieRepository, PasswordService, TokenService, UserRepository};
use cinedex_core::services::{Accounts, MovieCatalog};
use cinedex_infra::{
    Argon2PasswordService, InMemoryMovieRepository, InMemoryUserRepository, JwtTokenService,
    LocalPosterStorage,
};

use crate::config::AppConfig;

type Repositories = (Arc<dyn MovieRepository>, Arc<dyn UserRepository>);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub movies: MovieCatalog,
    pub accounts: Accounts,
    pub tokens: Arc<dyn TokenService>,
    /// Which repository implementation is serving requests.
    pub backend: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let posters = LocalPosterStorage::new(&config.upload_dir);
        if let Err(e) = posters.ensure_root().await {
            tracing::error!(
                dir = %config.upload_dir.display(),
                "Failed to create upload directory: {}",
                e
            );
        }

        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        let state = match database_repositories(config).await {
            Some((movies, users)) => Self::assemble(movies, users, posters, tokens, "postgres"),
            None => Self::in_memory(posters, tokens),
        };

        tracing::info!(backend = state.backend, "Application state initialized");
        state
    }

    /// State backed by in-memory repositories. Data is lost on restart.
    pub fn in_memory(posters: LocalPosterStorage, tokens: Arc<dyn TokenService>) -> Self {
        Self::assemble(
            Arc::new(InMemoryMovieRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            posters,
            tokens,
            "memory",
        )
    }

    fn assemble(
        movies: Arc<dyn MovieRepository>,
        users: Arc<dyn UserRepository>,
        posters: LocalPosterStorage,
        tokens: Arc<dyn TokenService>,
        backend: &'static str,
    ) -> Self {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Self {
            movies: MovieCatalog::new(movies, Arc::new(posters)),
            accounts: Accounts::new(users, passwords, tokens.clone()),
            tokens,
            backend,
        }
    }
}

#[cfg(feature = "postgres")]
async fn database_repositories(config: &AppConfig) -> Option<Repositories> {
    use cinedex_infra::database::{PostgresMovieRepository, PostgresUserRepository, connect};
    use migration::{Migrator, MigratorTrait};

    let Some(db_config) = config.database.as_ref() else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return None;
    };

    let db = match connect(db_config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            return None;
        }
    };

    if config.auto_migrate {
        if let Err(e) = Migrator::up(&db, None).await {
            tracing::error!("Failed to apply migrations: {}. Using in-memory fallback.", e);
            return None;
        }
        tracing::info!("Database migrations applied");
    }

    let db = Arc::new(db);
    Some((
        Arc::new(PostgresMovieRepository::new(db.clone())),
        Arc::new(PostgresUserRepository::new(db)),
    ))
}

#[cfg(not(feature = "postgres"))]
async fn database_repositories(_config: &AppConfig) -> Option<Repositories> {
    tracing::info!("Running without postgres feature - using in-memory repositories");
    None
}
