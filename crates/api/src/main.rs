use anyhow::{Context, Result};
use tracing::info;

use artist_schema_api::{app, config, middleware, services};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::Config::load().context("loading configuration")?;

    middleware::init_logging(&config.logging);
    middleware::init_metrics().context("installing metrics recorder")?;

    info!("Starting artist schema API v{}", env!("CARGO_PKG_VERSION"));

    let db_config = persistence::db::DatabaseConfig::from(&config.database);
    let pool = persistence::db::create_pool(&db_config)
        .await
        .context("connecting to database")?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    if config.seed.artist_categories {
        services::seed_artist_categories(&pool)
            .await
            .context("seeding artist categories")?;
    }

    let addr = config.socket_addr().context("invalid server address")?;
    let app = app::create_app(config, pool);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
