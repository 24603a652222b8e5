//! Add/edit movie form rules.
//!
//! These run before anything is sent and are stricter than the server in
//! places (title length, earliest year, image dimensions). The server stays
//! the authority; passing here does not guarantee a 2xx.

use chrono::{Datelike, Utc};

use crate::api::PosterFile;

pub const TITLE_MAX_CHARS: usize = 100;
/// Year of the first surviving motion picture.
pub const EARLIEST_YEAR: i32 = 1888;
pub const MAX_YEARS_AHEAD: i32 = 5;

pub const MIN_POSTER_WIDTH: u32 = 300;
pub const MIN_POSTER_HEIGHT: u32 = 400;
pub const MAX_POSTER_WIDTH: u32 = 2000;
pub const MAX_POSTER_HEIGHT: u32 = 3000;

/// Whether the form creates a movie or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Raw form input.
#[derive(Debug, Clone, Default)]
pub struct MovieFormInput {
    pub title: String,
    pub release_year: Option<i32>,
    pub poster: Option<PosterFile>,
    /// Decoded `(width, height)` of `poster`, or `None` if it could not be read.
    pub poster_dimensions: Option<(u32, u32)>,
}

/// Per-field messages; an empty value means the form may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub title: Option<String>,
    pub release_year: Option<String>,
    pub poster: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.release_year.is_none() && self.poster.is_none()
    }
}

/// Check every field of the form against the current calendar year.
pub fn validate(input: &MovieFormInput, mode: FormMode) -> FormErrors {
    validate_for_year(input, mode, Utc::now().year())
}

fn validate_for_year(input: &MovieFormInput, mode: FormMode, current_year: i32) -> FormErrors {
    FormErrors {
        title: check_title(&input.title).err(),
        release_year: check_release_year(input.release_year, current_year).err(),
        poster: match &input.poster {
            Some(poster) => check_poster(poster, input.poster_dimensions).err(),
            None if mode == FormMode::Create => Some("Poster image is required".to_string()),
            None => None,
        },
    }
}

pub fn check_title(title: &str) -> Result<(), String> {
    let len = title.chars().count();
    if len == 0 {
        return Err("Title is required".to_string());
    }
    if len > TITLE_MAX_CHARS {
        return Err("Title is too long".to_string());
    }
    Ok(())
}

pub fn check_release_year(year: Option<i32>, current_year: i32) -> Result<(), String> {
    let Some(year) = year else {
        return Err("Release year is required".to_string());
    };
    if year < EARLIEST_YEAR {
        return Err(format!("Year must be {EARLIEST_YEAR} or later"));
    }
    if year > current_year + MAX_YEARS_AHEAD {
        return Err("Year is too far in the future".to_string());
    }
    Ok(())
}

/// The picked file must be an image whose dimensions fall inside the poster bounds.
pub fn check_poster(poster: &PosterFile, dimensions: Option<(u32, u32)>) -> Result<(), String> {
    if !poster.is_image() {
        return Err("Please choose an image file".to_string());
    }
    let Some((width, height)) = dimensions else {
        return Err("Failed to load image. Please try another file.".to_string());
    };
    check_dimensions(width, height)
}

pub fn check_dimensions(width: u32, height: u32) -> Result<(), String> {
    if width < MIN_POSTER_WIDTH || height < MIN_POSTER_HEIGHT {
        return Err(format!(
            "Image is too small ({width}x{height}px). Please use an image at least \
             {MIN_POSTER_WIDTH}x{MIN_POSTER_HEIGHT} pixels."
        ));
    }
    if width > MAX_POSTER_WIDTH || height > MAX_POSTER_HEIGHT {
        return Err(format!(
            "Image is too large ({width}x{height}px). Please use an image no larger than \
             {MAX_POSTER_WIDTH}x{MAX_POSTER_HEIGHT} pixels."
        ));
    }
    Ok(())
}

/// The file a drop onto the poster area selects.
///
/// Only the first dropped file counts; a drop that starts with a non-image selects nothing.
pub fn pick_dropped(files: &[PosterFile]) -> Option<&PosterFile> {
    files.first().filter(|file| file.is_image())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: &str) -> PosterFile {
        PosterFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    fn valid_input() -> MovieFormInput {
        MovieFormInput {
            title: "Dune".to_string(),
            release_year: Some(2021),
            poster: Some(file("dune.jpg", "image/jpeg")),
            poster_dimensions: Some((600, 900)),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(validate_for_year(&valid_input(), FormMode::Create, 2026).is_empty());
    }

    #[test]
    fn test_title_rules() {
        assert_eq!(check_title("").unwrap_err(), "Title is required");
        assert_eq!(check_title(&"x".repeat(101)).unwrap_err(), "Title is too long");
        assert!(check_title(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(
            check_release_year(Some(1887), 2026).unwrap_err(),
            "Year must be 1888 or later"
        );
        assert!(check_release_year(Some(1888), 2026).is_ok());
        assert!(check_release_year(Some(2031), 2026).is_ok());
        assert_eq!(
            check_release_year(Some(2032), 2026).unwrap_err(),
            "Year is too far in the future"
        );
        assert!(check_release_year(None, 2026).is_err());
    }

    #[test]
    fn test_poster_required_only_on_create() {
        let input = MovieFormInput {
            poster: None,
            poster_dimensions: None,
            ..valid_input()
        };

        let errors = validate_for_year(&input, FormMode::Create, 2026);
        assert_eq!(errors.poster.as_deref(), Some("Poster image is required"));

        assert!(validate_for_year(&input, FormMode::Edit, 2026).is_empty());
    }

    #[test]
    fn test_dimension_messages() {
        assert_eq!(
            check_dimensions(200, 300).unwrap_err(),
            "Image is too small (200x300px). Please use an image at least 300x400 pixels."
        );
        assert_eq!(
            check_dimensions(2500, 3000).unwrap_err(),
            "Image is too large (2500x3000px). Please use an image no larger than 2000x3000 pixels."
        );
        assert!(check_dimensions(300, 400).is_ok());
        assert!(check_dimensions(2000, 3000).is_ok());
    }

    #[test]
    fn test_poster_must_be_image() {
        let poster = file("notes.txt", "text/plain");
        assert!(check_poster(&poster, Some((600, 900))).is_err());

        let poster = file("dune.jpg", "image/jpeg");
        assert_eq!(
            check_poster(&poster, None).unwrap_err(),
            "Failed to load image. Please try another file."
        );
    }

    #[test]
    fn test_drop_takes_only_first_file() {
        let files = [
            file("notes.txt", "text/plain"),
            file("a.png", "image/png"),
            file("b.jpg", "image/jpeg"),
        ];
        assert_eq!(pick_dropped(&files), None);
        assert_eq!(
            pick_dropped(&files[1..]).map(|f| f.file_name.as_str()),
            Some("a.png")
        );
        assert_eq!(pick_dropped(&[]), None);
    }
}
