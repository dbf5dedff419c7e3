//! Business logic services

pub mod beatmap_service;
pub mod difficulty_service;
pub mod performance_service;

pub use beatmap_service::BeatmapService;
pub use difficulty_service::DifficultyService;
pub use performance_service::PerformanceService;

use std::sync::Arc;

use crate::{
    clients::{BEATMAP_PROVIDER, DIFFICULTY_CALCULATOR},
    container::{Container, Token},
    db::{ATTRIBUTE_CACHE, SCORE_REPOSITORY},
    error::BootstrapError,
    registry::{ComponentKind, ComponentRegistry},
};

pub const BEATMAP_SERVICE: Token<BeatmapService> = Token::new("BeatmapService");
pub const DIFFICULTY_SERVICE: Token<DifficultyService> = Token::new("DifficultyService");
pub const PERFORMANCE_SERVICE: Token<PerformanceService> = Token::new("PerformanceService");

/// Declare and wire the services
pub fn register(
    registry: &mut ComponentRegistry,
    container: &mut Container,
) -> Result<(), BootstrapError> {
    registry.declare_type::<BeatmapService, _>(ComponentKind::Service, &BEATMAP_SERVICE)?;
    container.register(BEATMAP_SERVICE, |c| {
        Ok(Arc::new(BeatmapService::new(c.resolve(&BEATMAP_PROVIDER)?)))
    })?;

    registry.declare_type::<DifficultyService, _>(ComponentKind::Service, &DIFFICULTY_SERVICE)?;
    container.register(DIFFICULTY_SERVICE, |c| {
        Ok(Arc::new(DifficultyService::new(
            c.resolve(&BEATMAP_SERVICE)?,
            c.resolve(&DIFFICULTY_CALCULATOR)?,
            c.resolve(&ATTRIBUTE_CACHE)?,
        )))
    })?;

    registry.declare_type::<PerformanceService, _>(ComponentKind::Service, &PERFORMANCE_SERVICE)?;
    container.register(PERFORMANCE_SERVICE, |c| {
        Ok(Arc::new(PerformanceService::new(
            c.resolve(&BEATMAP_SERVICE)?,
            c.resolve(&DIFFICULTY_CALCULATOR)?,
            c.resolve(&SCORE_REPOSITORY)?,
        )))
    })?;

    Ok(())
}
