//! Application bootstrap
//!
//! Start-up runs in a fixed order: shared infrastructure goes into the
//! container as ready instances, every component module then declares
//! itself to the registry and registers its factory, and finally the
//! assembler turns the registry's handler groups into a router. Any error
//! along the way aborts start-up.

use std::{sync::Arc, time::Duration};

use axum::{middleware, Router};
use redis::aio::ConnectionManager;
use reqwest::Client;
use sqlx::PgPool;
use tracing::info;

use crate::{
    clients,
    config::{CalculatorConfig, Config},
    container::Container,
    db,
    error::BootstrapError,
    handlers,
    middleware::logging_middleware,
    registry::{ComponentKind, ComponentRegistry},
    routing::RouterAssembler,
    services,
};

/// Tokens of the pre-built infrastructure instances
pub mod tokens {
    use redis::aio::ConnectionManager;
    use reqwest::Client;
    use sqlx::PgPool;

    use crate::{config::Config, container::Token};

    pub const APP_CONFIG: Token<Config> = Token::new("Config");
    pub const HTTP_CLIENT: Token<Client> = Token::new("HttpClient");
    pub const DATABASE: Token<PgPool> = Token::new("Database");
    pub const REDIS: Token<ConnectionManager> = Token::new("Redis");
}

/// Outbound HTTP client shared by the API clients
pub fn http_client(config: &CalculatorConfig) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
}

/// Register configuration and backend connections as container instances
pub fn register_infrastructure(
    container: &mut Container,
    config: Config,
    http: Client,
    pool: PgPool,
    redis: ConnectionManager,
) -> Result<(), BootstrapError> {
    container.register_instance(tokens::APP_CONFIG, Arc::new(config))?;
    container.register_instance(tokens::HTTP_CLIENT, Arc::new(http))?;
    container.register_instance(tokens::DATABASE, Arc::new(pool))?;
    container.register_instance(tokens::REDIS, Arc::new(redis))?;
    Ok(())
}

/// Declare every component, leaves first
pub fn register_components(
    registry: &mut ComponentRegistry,
    container: &mut Container,
    config: &Config,
) -> Result<(), BootstrapError> {
    clients::register(registry, container)?;
    db::register(registry, container)?;
    services::register(registry, container)?;
    handlers::register(registry, container, &config.security)?;

    for kind in [
        ComponentKind::ApiClient,
        ComponentKind::Repository,
        ComponentKind::Service,
        ComponentKind::HandlerGroup,
    ] {
        info!(kind = %kind, count = registry.list_declared(kind).count(), "Components declared");
    }

    Ok(())
}

/// Assemble the registry's handler groups into the application router
pub fn build_router(
    registry: &ComponentRegistry,
    container: &Container,
) -> Result<Router, BootstrapError> {
    let assembly = RouterAssembler::new(registry, container).assemble()?;
    info!(routes = assembly.bindings.len(), "Router assembled");

    Ok(assembly
        .router
        .layer(middleware::from_fn(logging_middleware)))
}
