//! Demo data seeder.
//!
//! Applies pending migrations and creates the demo account if it does not
//! exist yet. Safe to run repeatedly.

use std::sync::Arc;

use anyhow::Context;

use cinedex_core::domain::Registration;
use cinedex_core::ports::UserRepository;
use cinedex_core::services::Accounts;
use cinedex_infra::database::{DatabaseConfig, PostgresUserRepository, connect};
use cinedex_infra::{Argon2PasswordService, JwtTokenService};
use migration::{Migrator, MigratorTrait};

const DEMO_EMAIL: &str = "demo@demo.com";
const DEMO_PASSWORD: &str = "demo123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set to seed")?;
    let db = connect(&DatabaseConfig::new(url))
        .await
        .context("failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("failed to apply migrations")?;

    let users = Arc::new(PostgresUserRepository::new(db));
    if users.find_by_email(DEMO_EMAIL).await?.is_some() {
        tracing::info!("Demo user already exists");
        return Ok(());
    }

    let accounts = Accounts::new(
        users,
        Arc::new(Argon2PasswordService::new()),
        Arc::new(JwtTokenService::from_env()),
    );
    let session = accounts
        .register(Registration {
            username: "demo".to_string(),
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
            first_name: Some("Demo".to_string()),
            last_name: Some("User".to_string()),
        })
        .await?;

    tracing::info!(user_id = %session.user.id, "Demo user created");
    Ok(())
}
