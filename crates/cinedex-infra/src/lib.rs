//! # Cinedex Infrastructure
//!
//! Concrete implementations of the ports defined in `cinedex-core`:
//! database repositories, in-memory fallbacks, token and password services,
//! and poster file storage.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;
pub mod memory;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

pub use memory::{InMemoryMovieRepository, InMemoryUserRepository};
pub use storage::LocalPosterStorage;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
