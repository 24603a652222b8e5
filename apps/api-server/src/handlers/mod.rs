//! HTTP handlers and route configuration.

mod auth;
mod health;
mod movies;
mod upload;


use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        // Public routes
        .route("/health", web::get().to(health::health_check))
        // Auth routes
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login)),
        )
        // Movie routes; create, update and delete take an `Identity`
        .service(
            web::scope("/movies")
                .route("", web::get().to(movies::list))
                .route("", web::post().to(movies::create))
                // Registered before `/{id}` so "search" is not parsed as an id.
                .route("/search", web::get().to(movies::search))
                .route("/{id}", web::get().to(movies::get))
                .route("/{id}", web::patch().to(movies::update))
                .route("/{id}", web::delete().to(movies::delete)),
        );
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    AppError::BadRequest(format!("Invalid JSON body: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    AppError::BadRequest(format!("Invalid query string: {err}")).into()
}

fn path_error(err: PathError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected path parameter");
    AppError::BadRequest("Invalid movie id".to_string()).into()
}
