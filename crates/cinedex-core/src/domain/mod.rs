//! Domain entities - the core business objects.

mod movie;
mod page;
mod poster;
mod user;

pub use movie::{
    MAX_RELEASE_YEAR, MIN_RELEASE_YEAR, Movie, MovieChanges, NewMovie, TITLE_MAX_CHARS,
};
pub use page::{DEFAULT_LIMIT, DEFAULT_PAGE, Page, PageRequest};
pub use poster::{
    ALLOWED_POSTER_EXTENSIONS, MAX_POSTER_BYTES, POSTER_URL_PREFIX, PosterUpload,
    poster_extension,
};
pub use user::{AuthSession, MIN_PASSWORD_CHARS, Registration, User};
