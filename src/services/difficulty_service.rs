//! Difficulty service

use std::sync::Arc;

use tracing::{debug, warn};

use super::BeatmapService;
use crate::{
    clients::DifficultyCalculator,
    constants::DIFFICULTY_CACHE_PREFIX,
    db::repositories::AttributeCache,
    envelope::OperationResult,
    error::AppResult,
    handlers::difficulty::{request::DifficultyQuery, response::DifficultyAttributesResponse},
    models::{Beatmap, CalculationInput, DifficultyAttributes},
};

/// Difficulty calculation with a read-through attribute cache
pub struct DifficultyService {
    beatmaps: Arc<BeatmapService>,
    calculator: Arc<dyn DifficultyCalculator>,
    cache: Arc<dyn AttributeCache>,
}

impl DifficultyService {
    pub fn new(
        beatmaps: Arc<BeatmapService>,
        calculator: Arc<dyn DifficultyCalculator>,
        cache: Arc<dyn AttributeCache>,
    ) -> Self {
        Self {
            beatmaps,
            calculator,
            cache,
        }
    }

    /// Difficulty attributes of a beatmap
    pub async fn attributes(&self, query: &DifficultyQuery) -> OperationResult<DifficultyAttributesResponse> {
        self.try_attributes(query).await.into()
    }

    async fn try_attributes(&self, query: &DifficultyQuery) -> AppResult<DifficultyAttributesResponse> {
        let beatmap = self.beatmaps.get(&query.beatmap).await?;
        let key = cache_key(query, &beatmap)?;

        let attributes = match self.cached(&key).await {
            Some(attributes) => attributes,
            None => {
                let attributes = self.calculator.difficulty(&input(query, &beatmap)).await?;
                if let Err(e) = self.cache.put(&key, &attributes).await {
                    warn!(key = %key, error = %e, "Failed to cache difficulty attributes");
                }
                attributes
            }
        };

        Ok(DifficultyAttributesResponse {
            beatmap: (&beatmap).into(),
            gamemode: query.gamemode,
            calculation_method: query.method,
            mods: query.mods.clone(),
            attributes,
        })
    }

    async fn cached(&self, key: &str) -> Option<DifficultyAttributes> {
        match self.cache.get(key).await {
            Ok(hit) => {
                debug!(key, hit = hit.is_some(), "Attribute cache lookup");
                hit
            }
            Err(e) => {
                warn!(key, error = %e, "Attribute cache unavailable");
                None
            }
        }
    }
}

fn input(query: &DifficultyQuery, beatmap: &Beatmap) -> CalculationInput {
    CalculationInput {
        gamemode: query.gamemode,
        method: query.method,
        beatmap_id: beatmap.id,
        beatmap_hash: beatmap.hash.clone(),
        osu_file: beatmap.osu_file.clone(),
        mods: query.mods.clone(),
        statistics: None,
        penalties: None,
    }
}

fn cache_key(query: &DifficultyQuery, beatmap: &Beatmap) -> AppResult<String> {
    Ok(format!(
        "{}:{}:{}:{}:{}",
        DIFFICULTY_CACHE_PREFIX,
        query.gamemode,
        u8::from(query.method),
        beatmap.hash,
        serde_json::to_string(&query.mods)?
    ))
}
