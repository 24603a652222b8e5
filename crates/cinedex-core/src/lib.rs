//! # Cinedex Core
//!
//! The domain layer of the movie catalog.
//! This crate contains the entities, validation rules, ports and services,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
