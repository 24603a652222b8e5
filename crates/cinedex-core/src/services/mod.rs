//! Services - the use cases behind the HTTP surface.

mod accounts;
mod catalog;

pub use accounts::Accounts;
pub use catalog::MovieCatalog;
