//! # Cinedex Client
//!
//! A typed client for the Cinedex HTTP API plus the state stores a front end
//! renders from:
//!
//! - [`ApiClient`] - reqwest-backed implementation of [`AuthApi`] and [`MovieApi`]
//! - [`AuthStore`] - the signed-in session, persisted to a JSON file
//! - [`MovieStore`] - the movie list with loading and error state
//! - [`form`] - advisory validation for the add/edit movie form
//!
//! Stores publish their state through a `tokio::sync::watch` channel; call
//! `subscribe` to be notified of every change.

pub mod api;
pub mod error;
pub mod form;
pub mod movies;
pub mod session;

pub use api::{
    ApiClient, AuthApi, HealthStatus, MovieApi, MovieDraft, MovieUpdate, PosterFile,
};
pub use error::ClientError;
pub use movies::{MovieState, MovieStore};
pub use session::{AuthState, AuthStore};
