//! Performance request DTOs

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{
        BeatmapRef, CalculationMethod, Gamemode, HitCounts, ModEntry, PerformancePenalties,
        ScoreStatistics,
    },
};

/// Validated parameters of a performance calculation
#[derive(Debug, Deserialize)]
pub struct PerformanceParams {
    pub gamemode: Gamemode,

    #[serde(rename = "calculationmethod")]
    pub calculation_method: CalculationMethod,

    #[serde(rename = "beatmapid")]
    pub beatmap_id: Option<u32>,

    #[serde(rename = "beatmaphash")]
    pub beatmap_hash: Option<String>,

    #[serde(default)]
    pub mods: Vec<ModEntry>,

    #[serde(rename = "maxcombo")]
    pub max_combo: Option<u32>,

    pub n300: Option<u32>,
    pub n100: Option<u32>,
    pub n50: Option<u32>,
    pub nmiss: Option<u32>,

    #[serde(rename = "sliderticksmissed")]
    pub slider_ticks_missed: Option<u32>,

    #[serde(rename = "sliderendsdropped")]
    pub slider_ends_dropped: Option<u32>,

    #[serde(rename = "aimslidercheesepenalty")]
    pub aim_slider_cheese_penalty: Option<f64>,

    #[serde(rename = "tappenalty")]
    pub tap_penalty: Option<f64>,

    #[serde(rename = "flashlightslidercheesepenalty")]
    pub flashlight_slider_cheese_penalty: Option<f64>,

    #[serde(rename = "visualslidercheesepenalty")]
    pub visual_slider_cheese_penalty: Option<f64>,
}

impl PerformanceParams {
    pub fn into_query(self) -> AppResult<PerformanceQuery> {
        let beatmap = BeatmapRef::from_parts(self.beatmap_id, self.beatmap_hash)
            .ok_or_else(|| AppError::validation("Either beatmap ID or hash must be provided."))?;

        // The hit count validator guarantees all four or none
        let hits = match (self.n300, self.n100, self.n50, self.nmiss) {
            (Some(n300), Some(n100), Some(n50), Some(nmiss)) => Some(HitCounts {
                n300,
                n100,
                n50,
                nmiss,
            }),
            _ => None,
        };

        Ok(PerformanceQuery {
            beatmap,
            gamemode: self.gamemode,
            method: self.calculation_method,
            mods: self.mods,
            statistics: ScoreStatistics {
                max_combo: self.max_combo,
                hits,
                slider_ticks_missed: self.slider_ticks_missed,
                slider_ends_dropped: self.slider_ends_dropped,
            },
            penalties: PerformancePenalties {
                aim_slider_cheese: self.aim_slider_cheese_penalty,
                tap: self.tap_penalty,
                flashlight_slider_cheese: self.flashlight_slider_cheese_penalty,
                visual_slider_cheese: self.visual_slider_cheese_penalty,
            },
        })
    }
}

/// Performance calculation for a caller-described play
#[derive(Debug, Clone)]
pub struct PerformanceQuery {
    pub beatmap: BeatmapRef,
    pub gamemode: Gamemode,
    pub method: CalculationMethod,
    pub mods: Vec<ModEntry>,
    pub statistics: ScoreStatistics,
    pub penalties: PerformancePenalties,
}

/// Validated parameters of a stored-score lookup
#[derive(Debug, Deserialize)]
pub struct ScorePerformanceParams {
    pub gamemode: Gamemode,

    #[serde(rename = "calculationmethod")]
    pub calculation_method: CalculationMethod,

    #[serde(rename = "beatmaphash")]
    pub beatmap_hash: String,

    /// Not covered by a validator; parsed here
    pub uid: Option<Value>,
}

impl ScorePerformanceParams {
    pub fn into_query(self) -> AppResult<ScorePerformanceQuery> {
        let uid = self
            .uid
            .as_ref()
            .and_then(parse_player_id)
            .ok_or_else(|| AppError::validation("Player ID must be a positive integer."))?;

        Ok(ScorePerformanceQuery {
            uid,
            beatmap_hash: self.beatmap_hash,
            gamemode: self.gamemode,
            method: self.calculation_method,
        })
    }
}

fn parse_player_id(value: &Value) -> Option<u32> {
    let id = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };

    u32::try_from(id).ok().filter(|id| *id > 0)
}

/// Best stored play of a player on a beatmap
#[derive(Debug, Clone)]
pub struct ScorePerformanceQuery {
    pub uid: u32,
    pub beatmap_hash: String,
    pub gamemode: Gamemode,
    pub method: CalculationMethod,
}
