//! Performance handlers

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
            GamemodeValidator, HitCountsValidator, MaxComboValidator, ModsValidator, Penalty,
            PenaltyValidator, SliderCountsValidator,
        },
        Authenticate, InterceptorChain,
    },
    registry::ComponentRegistry,
    routing::{HandlerGroupBuilder, HandlerGroupDefinition},
    services::PERFORMANCE_SERVICE,
};

pub const PERFORMANCE_HANDLER: Token<PerformanceHandler> = Token::new("PerformanceHandler");

fn calculate_validators() -> InterceptorChain {
    InterceptorChain::new()
        .with(GamemodeValidator::new())
        .with(CalculationMethodValidator::new())
        .with(BeatmapIdValidator::optional())
        .with(BeatmapHashValidator::optional())
        .with(ModsValidator::optional())
        .with(MaxComboValidator::optional())
        .with(HitCountsValidator::optional())
        .with(SliderCountsValidator::optional())
        .with(PenaltyValidator::optional(Penalty::AimSliderCheese))
        .with(PenaltyValidator::optional(Penalty::Tap))
        .with(PenaltyValidator::optional(Penalty::FlashlightSliderCheese))
        .with(PenaltyValidator::optional(Penalty::VisualSliderCheese))
}

fn score_validators() -> InterceptorChain {
    InterceptorChain::new()
        .with(GamemodeValidator::new())
        .with(CalculationMethodValidator::new())
        .with(BeatmapHashValidator::new())
}

/// Performance routes
pub fn routes(security: &SecurityConfig) -> HandlerGroupDefinition {
    HandlerGroupBuilder::new(PERFORMANCE_HANDLER, "/api/performance")
        .intercept(Authenticate::new(&security.internal_key))
        .post("/calculate", "calculate", calculate_validators(), PerformanceHandler::calculate)
        .get("/score", "score", score_validators(), PerformanceHandler::score)
        .build()
}

/// Declare and wire the performance handler group
pub fn register(
    registry: &mut ComponentRegistry,
    container: &mut Container,
    security: &SecurityConfig,
) -> Result<(), BootstrapError> {
    registry.declare_handler_group(routes(security))?;
    container.register(PERFORMANCE_HANDLER, |c| {
        Ok(Arc::new(PerformanceHandler::new(c.resolve(&PERFORMANCE_SERVICE)?)))
    })?;

    Ok(())
}
