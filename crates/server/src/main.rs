mod app;
mod auth;
mod config;
mod doc;
mod dtos;
mod error;
mod extract;
mod integrations;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod utils;

use anyhow::Context;
use config::Config;
use database::{db::create_connection, seed::seed_demo_data};
use log::info;
use migration::{Migrator, MigratorTrait};
use state::AppState;
use std::sync::Arc;
use utils::shutdown::shutdown_signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::load()?;

    let db = create_connection(&config.database_url)
        .await
        .context("Failed to connect to the database")?;

    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;
    info!("Database schema is up to date");

    if config.seed_demo_data
        && let Some(password) = config.admin_password.as_deref()
    {
        let hash = auth::password::hash_password(password)
            .context("Failed to hash the admin password")?;
        seed_demo_data(&db, &config.admin_email, hash)
            .await
            .context("Failed to seed demo data")?;
    }

    let app = app::build(AppState::new(Arc::new(db), &config), &config);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    info!("Running axum on http://localhost:{}", config.port);
    info!("API documentation at http://localhost:{}/docs", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
