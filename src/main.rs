//! Difficalc - Application Entry Point
//!
//! This is the main entry point for the difficalc server.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use difficalc::{
    app,
    config::CONFIG,
    container::Container,
    db,
    middleware::request_span,
    registry::ComponentRegistry,
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

    tracing::info!("Starting difficalc server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;
    db::test_connection(&db_pool).await?;

    // Initialize Redis connection
    tracing::info!("Connecting to Redis...");
    let redis_conn = db::create_redis(&CONFIG.redis).await?;

    let http = app::http_client(&CONFIG.calculator)?;

    // Wire components and assemble routes
    let mut registry = ComponentRegistry::new();
    let mut container = Container::new();
    app::register_infrastructure(&mut container, CONFIG.clone(), http, db_pool, redis_conn)?;
    app::register_components(&mut registry, &mut container, &CONFIG)?;

    let app = app::build_router(&registry, &container)?
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
