//! Poster upload rules.

use crate::error::UploadError;

pub const ALLOWED_POSTER_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// 5 MiB.
pub const MAX_POSTER_BYTES: usize = 5 * 1024 * 1024;

/// Public path under which stored posters are served.
pub const POSTER_URL_PREFIX: &str = "/uploads/posters";

/// Return the extension of `file_name` if it is an allowed image type.
///
/// The comparison is case-insensitive; the extension is returned as written.
/// The extension is whatever follows the last `.`, so `.jpg` on its own counts.
pub fn poster_extension(file_name: &str) -> Result<&str, UploadError> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| {
            ALLOWED_POSTER_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .ok_or_else(|| UploadError::UnsupportedType(file_name.to_string()))
}

/// An uploaded poster that passed the extension and size checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl PosterUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        poster_extension(&file_name)?;
        if bytes.len() > MAX_POSTER_BYTES {
            return Err(UploadError::TooLarge {
                limit: MAX_POSTER_BYTES,
            });
        }
        Ok(Self { file_name, bytes })
    }

    /// Original client-side file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn extension(&self) -> &str {
        // Checked in `new`.
        poster_extension(&self.file_name).unwrap_or_default()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
