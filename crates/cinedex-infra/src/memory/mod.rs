//! In-memory repositories - used when no database is configured.
//!
//! Data is lost on process restart.

mod movies;
mod users;

pub use movies::InMemoryMovieRepository;
pub use users::InMemoryUserRepository;
