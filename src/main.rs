//! Server entrypoint: env config, pool, router, serve.

use recycling_centers_api::{app, AppState, Config};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("recycling_centers_api=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let pool = PgPoolOptions::new()
        .min_connections(config.pool.size)
        .max_connections(config.pool.max_connections())
        .acquire_timeout(config.pool.acquire_timeout)
        .max_lifetime(config.pool.max_lifetime)
        .connect(&config.database_url)
        .await?;

    let state = AppState { pool };
    let app = app(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
