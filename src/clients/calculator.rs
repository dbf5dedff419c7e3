//! Calculation engine client
//!
//! Difficulty and performance math runs in a separate engine; this client
//! only ships inputs to it and decodes the attributes it returns.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::CalculatorConfig,
    error::AppResult,
    models::{CalculationInput, DifficultyAttributes, PerformanceCalculation},
};

/// Difficulty and performance calculator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DifficultyCalculator: Send + Sync {
    async fn difficulty(&self, input: &CalculationInput) -> AppResult<DifficultyAttributes>;

    async fn performance(&self, input: &CalculationInput) -> AppResult<PerformanceCalculation>;
}

/// HTTP client for the calculation engine
pub struct CalculatorClient {
    http: Client,
    base_url: String,
}

impl CalculatorClient {
    pub fn new(http: Client, config: &CalculatorConfig) -> Self {
        Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        }
    }

    async fn post<T: DeserializeOwned>(&self, endpoint: &str, input: &CalculationInput) -> AppResult<T> {
        debug!(
            endpoint,
            beatmap_id = input.beatmap_id,
            gamemode = %input.gamemode,
            method = input.method.as_str(),
            "Calling calculation engine"
        );

        let value = self
            .http
            .post(format!("{}/{}", self.base_url, endpoint))
            .json(input)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(value)
    }
}

#[async_trait]
impl DifficultyCalculator for CalculatorClient {
    async fn difficulty(&self, input: &CalculationInput) -> AppResult<DifficultyAttributes> {
        self.post("difficulty", input).await
    }

    async fn performance(&self, input: &CalculationInput) -> AppResult<PerformanceCalculation> {
        self.post("performance", input).await
    }
}
