//! Rankboard - Application Entry Point

use std::{net::SocketAddr, sync::Arc};

use axum::{middleware, Router};
use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rankboard::{
    admin::site_registry,
    config::CONFIG,
    constants::cache_backends,
    db,
    handlers,
    middleware::logging_middleware,
    pagination::{CountCache, MemoryCountCache, RedisCountCache},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Rankboard server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Count cache
    let count_cache: Arc<dyn CountCache> = match CONFIG.pagination.cache_backend.as_str() {
        cache_backends::MEMORY => {
            tracing::info!("Using in-process count cache");
            Arc::new(MemoryCountCache::new())
        }
        _ => {
            tracing::info!("Connecting to Redis...");
            let redis_client = RedisClient::open(CONFIG.redis.url.as_str())?;
            let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;
            Arc::new(RedisCountCache::new(redis_conn))
        }
    };

    let registry = site_registry()?;
    tracing::info!(listings = ?registry.names().collect::<Vec<_>>(), "Admin listings registered");

    // Create application state
    let state = AppState::new(db_pool, count_cache, registry, CONFIG.clone());

    // Build the router
    let app = Router::new()
        .merge(handlers::routes(state.clone()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
