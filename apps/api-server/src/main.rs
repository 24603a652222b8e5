//! # Cinedex API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_files::Files;
use actix_web::{App, HttpServer, middleware::from_fn, web};
use tracing_actix_web::TracingLogger;

use cinedex_core::domain::POSTER_URL_PREFIX;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_telemetry(&TelemetryConfig::from_env());

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Cinedex API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(&config).await;
    let upload_dir = config.upload_dir.clone();

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(observability::echo_request_id))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
            .service(Files::new(POSTER_URL_PREFIX, upload_dir.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
