//! Inbound API clients

pub mod calculator;
pub mod osu_api;

pub use calculator::{CalculatorClient, DifficultyCalculator};
pub use osu_api::{BeatmapProvider, OsuApiClient};

use std::sync::Arc;

use crate::{
    app::tokens::{APP_CONFIG, HTTP_CLIENT},
    container::{Container, Token},
    error::BootstrapError,
    registry::{ComponentKind, ComponentRegistry},
};

pub const BEATMAP_PROVIDER: Token<dyn BeatmapProvider> = Token::new("BeatmapProvider");
pub const DIFFICULTY_CALCULATOR: Token<dyn DifficultyCalculator> =
    Token::new("DifficultyCalculator");

/// Declare and wire the API clients
pub fn register(
    registry: &mut ComponentRegistry,
    container: &mut Container,
) -> Result<(), BootstrapError> {
    registry.declare_type::<OsuApiClient, _>(ComponentKind::ApiClient, &BEATMAP_PROVIDER)?;
    container.register(BEATMAP_PROVIDER, |c| {
        let config = c.resolve(&APP_CONFIG)?;
        let http = c.resolve(&HTTP_CLIENT)?;
        Ok(Arc::new(OsuApiClient::new((*http).clone(), &config.osu_api)) as Arc<dyn BeatmapProvider>)
    })?;

    registry.declare_type::<CalculatorClient, _>(ComponentKind::ApiClient, &DIFFICULTY_CALCULATOR)?;
    container.register(DIFFICULTY_CALCULATOR, |c| {
        let config = c.resolve(&APP_CONFIG)?;
        let http = c.resolve(&HTTP_CLIENT)?;
        Ok(Arc::new(CalculatorClient::new((*http).clone(), &config.calculator))
            as Arc<dyn DifficultyCalculator>)
    })?;

    Ok(())
}
