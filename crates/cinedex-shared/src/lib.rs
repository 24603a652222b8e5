//! # Cinedex Shared
//!
//! Wire types shared between the HTTP server and the client crate.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
