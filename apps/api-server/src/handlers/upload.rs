//! Multipart movie form parsing.

use actix_multipart::{Field, Multipart, MultipartError};
use futures::TryStreamExt;

use cinedex_core::domain::{MAX_POSTER_BYTES, PosterUpload, poster_extension};
use cinedex_core::error::UploadError;
use cinedex_shared::dto::fields;

use crate::middleware::error::{AppError, AppResult};

/// Upper bound for a single text part.
const MAX_TEXT_FIELD_BYTES: usize = 4 * 1024;

/// The fields of a `POST /movies` or `PATCH /movies/{id}` body.
///
/// Every part is optional here; the handlers decide which ones are required.
#[derive(Debug, Default)]
pub struct MovieForm {
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub poster: Option<PosterUpload>,
}

impl MovieForm {
    /// Consume the multipart stream.
    ///
    /// The poster's extension is checked before its bytes are read and its size
    /// while they are streamed, so a rejected upload is never buffered in full.
    pub async fn read(mut payload: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                fields::TITLE => form.title = Some(read_text(&mut field).await?),
                fields::RELEASE_YEAR => {
                    form.release_year = parse_year(&read_text(&mut field).await?)?;
                }
                fields::POSTER => form.poster = read_poster(&mut field).await?,
                other => {
                    tracing::debug!(field = %other, "Skipping unknown form field");
                    drain(&mut field).await?;
                }
            }
        }

        Ok(form)
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed multipart body: {err}"))
}

async fn read_text(field: &mut Field) -> AppResult<String> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        if buf.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(AppError::BadRequest(format!(
                "Field '{}' is too long",
                field.name().unwrap_or_default()
            )));
        }
        buf.extend_from_slice(&chunk);
    }

    String::from_utf8(buf).map_err(|_| AppError::BadRequest("Form fields must be UTF-8".into()))
}

/// A blank year counts as not provided.
fn parse_year(raw: &str) -> AppResult<Option<i32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| AppError::BadRequest("Release year must be a number".into()))
}

async fn read_poster(field: &mut Field) -> AppResult<Option<PosterUpload>> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or_default()
        .to_string();

    // Browsers send an empty file part when no file was chosen.
    if file_name.is_empty() {
        drain(field).await?;
        return Ok(None);
    }

    poster_extension(&file_name)?;

    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        if bytes.len() + chunk.len() > MAX_POSTER_BYTES {
            tracing::debug!(file = %file_name, "Poster exceeds size limit");
            return Err(UploadError::TooLarge {
                limit: MAX_POSTER_BYTES,
            }
            .into());
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(Some(PosterUpload::new(file_name, bytes)?))
}

async fn drain(field: &mut Field) -> AppResult<()> {
    while field.try_next().await.map_err(multipart_error)?.is_some() {}
    Ok(())
}
