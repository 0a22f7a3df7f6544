use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use marquee_api::config::Config;
use marquee_api::routes::create_router;
use marquee_api::state::AppState;
use marquee_api::store::{create_pool, create_redis_client, PgStore, RedisSessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (falls back to local defaults)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting marquee-api v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;
    info!("Database ready, migrations applied");

    // Initialize Redis for guest session lists
    let redis_client = create_redis_client(&config.redis_url)?;
    info!("Redis client initialized");

    // Wire the stores into shared application state
    let store = Arc::new(PgStore::new(pool));
    let sessions = Arc::new(RedisSessionStore::new(redis_client));
    let state = AppState::new(store.clone(), store, sessions);

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
