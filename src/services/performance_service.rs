//! Performance service

use std::sync::Arc;

use tracing::debug;

use super::BeatmapService;
use crate::{
    clients::DifficultyCalculator,
    db::repositories::ScoreRepository,
    envelope::OperationResult,
    error::{AppError, AppResult},
    handlers::performance::{
        request::{PerformanceQuery, ScorePerformanceQuery},
        response::PerformanceResponse,
    },
    models::{BeatmapRef, CalculationInput},
};

/// Performance calculation for supplied or stored plays
pub struct PerformanceService {
    beatmaps: Arc<BeatmapService>,
    calculator: Arc<dyn DifficultyCalculator>,
    scores: Arc<dyn ScoreRepository>,
}

impl PerformanceService {
    pub fn new(
        beatmaps: Arc<BeatmapService>,
        calculator: Arc<dyn DifficultyCalculator>,
        scores: Arc<dyn ScoreRepository>,
    ) -> Self {
        Self {
            beatmaps,
            calculator,
            scores,
        }
    }

    /// Performance of a play described by the caller
    pub async fn calculate(&self, query: &PerformanceQuery) -> OperationResult<PerformanceResponse> {
        self.try_calculate(query).await.into()
    }

    /// Performance of a player's best stored play on a beatmap
    pub async fn score_performance(
        &self,
        query: &ScorePerformanceQuery,
    ) -> OperationResult<PerformanceResponse> {
        self.try_score_performance(query).await.into()
    }

    async fn try_calculate(&self, query: &PerformanceQuery) -> AppResult<PerformanceResponse> {
        let beatmap = self.beatmaps.get(&query.beatmap).await?;

        let input = CalculationInput {
            gamemode: query.gamemode,
            method: query.method,
            beatmap_id: beatmap.id,
            beatmap_hash: beatmap.hash.clone(),
            osu_file: beatmap.osu_file.clone(),
            mods: query.mods.clone(),
            statistics: Some(query.statistics.clone()),
            penalties: (!query.penalties.is_empty()).then(|| query.penalties.clone()),
        };

        let calculation = self.calculator.performance(&input).await?;
        Ok(PerformanceResponse::new(&beatmap, query.gamemode, query.method, input.mods, calculation))
    }

    async fn try_score_performance(
        &self,
        query: &ScorePerformanceQuery,
    ) -> AppResult<PerformanceResponse> {
        let score = self
            .scores
            .find_best(query.uid, &query.beatmap_hash)
            .await?
            .ok_or_else(|| AppError::NotFound("Score not found.".to_string()))?;

        debug!(score_id = score.id, uid = query.uid, "Calculating stored score");

        let beatmap = self
            .beatmaps
            .get(&BeatmapRef::Hash(query.beatmap_hash.clone()))
            .await?;

        let input = CalculationInput {
            gamemode: query.gamemode,
            method: query.method,
            beatmap_id: beatmap.id,
            beatmap_hash: beatmap.hash.clone(),
            osu_file: beatmap.osu_file.clone(),
            mods: score.mod_entries()?,
            statistics: Some(score.statistics()),
            penalties: None,
        };

        let calculation = self.calculator.performance(&input).await?;
        Ok(PerformanceResponse::new(&beatmap, query.gamemode, query.method, input.mods, calculation))
    }
}
