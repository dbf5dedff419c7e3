//! Difficulty response DTOs

use serde::Serialize;

use crate::models::{BeatmapSummary, CalculationMethod, DifficultyAttributes, Gamemode, ModEntry};

/// Difficulty attributes of a beatmap under the requested mods
#[derive(Debug, Clone, Serialize)]
pub struct DifficultyAttributesResponse {
    pub beatmap: BeatmapSummary,
    pub gamemode: Gamemode,
    pub calculation_method: CalculationMethod,
    pub mods: Vec<ModEntry>,
    pub attributes: DifficultyAttributes,
}
