//! Health check handlers

use std::sync::Arc;

use axum::Json;
use serde::Serialize;

use crate::{
    container::{Container, Token},
    error::BootstrapError,
    middleware::{InterceptorChain, RequestParams},
    registry::ComponentRegistry,
    routing::{HandlerGroupBuilder, HandlerGroupDefinition},
};

pub const HEALTH_HANDLER: Token<HealthHandler> = Token::new("HealthHandler");

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Unauthenticated liveness probe
pub struct HealthHandler;

impl HealthHandler {
    async fn check(self: Arc<Self>, _params: RequestParams) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

/// Health routes
pub fn routes() -> HandlerGroupDefinition {
    HandlerGroupBuilder::new(HEALTH_HANDLER, "/")
        .get("/health", "check", InterceptorChain::new(), HealthHandler::check)
        .build()
}

pub fn register(
    registry: &mut ComponentRegistry,
    container: &mut Container,
) -> Result<(), BootstrapError> {
    registry.declare_handler_group(routes())?;
    container.register_instance(HEALTH_HANDLER, Arc::new(HealthHandler))?;
    Ok(())
}
