//! Difficulty handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;

use std::sync::Arc;

use crate::{
    config::SecurityConfig,
    container::{Container, Token},
    error::BootstrapError,
    middleware::{
        validators::{
            BeatmapHashValidator, BeatmapIdValidator, CalculationMethodValidator,
            GamemodeValidator, ModsValidator,
        },
        Authenticate, InterceptorChain,
    },
    registry::ComponentRegistry,
    routing::{HandlerGroupBuilder, HandlerGroupDefinition},
    services::DIFFICULTY_SERVICE,
};

pub const DIFFICULTY_HANDLER: Token<DifficultyHandler> = Token::new("DifficultyHandler");

/// Interceptors shared by every difficulty route
fn attribute_validators() -> InterceptorChain {
    InterceptorChain::new()
        .with(GamemodeValidator::new())
        .with(CalculationMethodValidator::new())
        .with(BeatmapIdValidator::optional())
        .with(BeatmapHashValidator::optional())
        .with(ModsValidator::optional())
}

/// Difficulty routes
pub fn routes(security: &SecurityConfig) -> HandlerGroupDefinition {
    HandlerGroupBuilder::new(DIFFICULTY_HANDLER, "/api/difficulty")
        .intercept(Authenticate::new(&security.internal_key))
        .get("/attributes", "attributes", attribute_validators(), DifficultyHandler::attributes)
        .post("/attributes", "attributes", attribute_validators(), DifficultyHandler::attributes)
        .build()
}

/// Declare and wire the difficulty handler group
pub fn register(
    registry: &mut ComponentRegistry,
    container: &mut Container,
    security: &SecurityConfig,
) -> Result<(), BootstrapError> {
    registry.declare_handler_group(routes(security))?;
    container.register(DIFFICULTY_HANDLER, |c| {
        Ok(Arc::new(DifficultyHandler::new(c.resolve(&DIFFICULTY_SERVICE)?)))
    })?;

    Ok(())
}
