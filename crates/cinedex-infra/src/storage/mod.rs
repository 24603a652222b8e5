//! Poster file storage.

mod local;

pub use local::LocalPosterStorage;
