//! Difficulty request DTOs

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{BeatmapRef, CalculationMethod, Gamemode, ModEntry},
};

/// Validated parameters of a difficulty request, as left by the interceptor chain
#[derive(Debug, Deserialize)]
pub struct DifficultyParams {
    pub gamemode: Gamemode,

    #[serde(rename = "calculationmethod")]
    pub calculation_method: CalculationMethod,

    #[serde(rename = "beatmapid")]
    pub beatmap_id: Option<u32>,

    #[serde(rename = "beatmaphash")]
    pub beatmap_hash: Option<String>,

    #[serde(default)]
    pub mods: Vec<ModEntry>,
}

impl DifficultyParams {
    pub fn into_query(self) -> AppResult<DifficultyQuery> {
        let beatmap = BeatmapRef::from_parts(self.beatmap_id, self.beatmap_hash)
            .ok_or_else(|| AppError::validation("Either beatmap ID or hash must be provided."))?;

        Ok(DifficultyQuery {
            beatmap,
            gamemode: self.gamemode,
            method: self.calculation_method,
            mods: self.mods,
        })
    }
}

/// Difficulty calculation request
#[derive(Debug, Clone)]
pub struct DifficultyQuery {
    pub beatmap: BeatmapRef,
    pub gamemode: Gamemode,
    pub method: CalculationMethod,
    pub mods: Vec<ModEntry>,
}
