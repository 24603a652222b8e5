//! Movie handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use cinedex_core::domain::{Movie, MovieChanges, NewMovie, PageRequest};
use cinedex_core::domain::{DEFAULT_LIMIT, DEFAULT_PAGE};
use cinedex_shared::dto::{ListMoviesQuery, MovieResponse, PaginatedResponse, SearchQuery};

use super::upload::MovieForm;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn movie_response(movie: Movie) -> MovieResponse {
    MovieResponse {
        id: movie.id,
        title: movie.title,
        release_year: movie.release_year,
        poster_url: movie.poster_url,
        created_at: movie.created_at,
        updated_at: movie.updated_at,
    }
}

/// POST /movies
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let form = MovieForm::read(payload).await?;

    let title = form
        .title
        .ok_or_else(|| AppError::BadRequest("Title is required".to_string()))?;
    let release_year = form
        .release_year
        .ok_or_else(|| AppError::BadRequest("Release year is required".to_string()))?;
    let draft = NewMovie::new(title, release_year)?;
    let poster = form
        .poster
        .ok_or_else(|| AppError::BadRequest("Poster image is required".to_string()))?;

    let movie = state.movies.create(draft, Some(poster)).await?;
    tracing::debug!(movie_id = %movie.id, user_id = %identity.user_id, "Movie added");

    Ok(HttpResponse::Created().json(movie_response(movie)))
}

/// GET /movies?page=&limit=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListMoviesQuery>,
) -> AppResult<HttpResponse> {
    let request = PageRequest::new(
        query.page.unwrap_or(DEFAULT_PAGE),
        query.limit.unwrap_or(DEFAULT_LIMIT),
    )?;

    let page = state.movies.list(request).await?.map(movie_response);

    Ok(HttpResponse::Ok().json(PaginatedResponse {
        data: page.items,
        total: page.total,
        page: page.page,
        total_pages: page.total_pages,
    }))
}

/// GET /movies/search?q=
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let movies = state.movies.search(&query.q).await?;
    let body: Vec<MovieResponse> = movies.into_iter().map(movie_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /movies/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let movie = state.movies.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(movie_response(movie)))
}

/// PATCH /movies/{id}
pub async fn update(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = MovieForm::read(payload).await?;

    // A blank title leaves the current one in place.
    let changes = MovieChanges {
        title: form.title.filter(|title| !title.trim().is_empty()),
        release_year: form.release_year,
    };

    let movie = state.movies.update(id, changes, form.poster).await?;
    tracing::debug!(movie_id = %id, user_id = %identity.user_id, "Movie edited");

    Ok(HttpResponse::Ok().json(movie_response(movie)))
}

/// DELETE /movies/{id}
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.movies.delete(id).await?;
    tracing::debug!(movie_id = %id, user_id = %identity.user_id, "Movie removed");

    Ok(HttpResponse::NoContent().finish())
}
