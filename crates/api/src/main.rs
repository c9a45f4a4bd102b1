use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

mod app;
mod config;
mod error;
mod middleware;
mod routes;

/// Connect to Postgres and bring the schema up to date.
async fn init_database(config: &persistence::db::DatabaseConfig) -> Result<PgPool> {
    let pool = persistence::db::create_pool(config).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    Ok(pool)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;
    middleware::logging::init_logging(&config.logging);

    info!(
        "Starting Regatta Registration API v{}",
        env!("CARGO_PKG_VERSION")
    );

    let pool = init_database(&config.database).await?;
    let app = app::create_app(config.clone(), pool);

    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
