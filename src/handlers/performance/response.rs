//! Performance response DTOs

use serde::Serialize;

use crate::models::{
    Beatmap, BeatmapSummary, CalculationMethod, DifficultyAttributes, Gamemode, ModEntry,
    PerformanceAttributes, PerformanceCalculation,
};

/// Performance of one play
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceResponse {
    pub beatmap: BeatmapSummary,
    pub gamemode: Gamemode,
    pub calculation_method: CalculationMethod,
    pub mods: Vec<ModEntry>,
    pub difficulty: DifficultyAttributes,
    pub performance: PerformanceAttributes,
}

impl PerformanceResponse {
    pub fn new(
        beatmap: &Beatmap,
        gamemode: Gamemode,
        calculation_method: CalculationMethod,
        mods: Vec<ModEntry>,
        calculation: PerformanceCalculation,
    ) -> Self {
        Self {
            beatmap: beatmap.into(),
            gamemode,
            calculation_method,
            mods,
            difficulty: calculation.difficulty,
            performance: calculation.performance,
        }
    }
}
