//! Calculation inputs and attribute types
//!
//! The attribute structs carry the headline numbers explicitly and keep every
//! other field the calculation engine reports in `details`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CalculationMethod, Gamemode};

/// One mod applied to a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModEntry {
    pub acronym: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

impl ModEntry {
    pub fn new(acronym: impl Into<String>) -> Self {
        Self {
            acronym: acronym.into(),
            settings: None,
        }
    }
}

/// Judgement counts of a play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitCounts {
    pub n300: u32,
    pub n100: u32,
    pub n50: u32,
    pub nmiss: u32,
}

/// What the player achieved; absent parts default to a full-combo play
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_combo: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<HitCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider_ticks_missed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider_ends_dropped: Option<u32>,
}

/// Caller overrides for performance penalties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformancePenalties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aim_slider_cheese: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flashlight_slider_cheese: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_slider_cheese: Option<f64>,
}

impl PerformancePenalties {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Request sent to the calculation engine
#[derive(Debug, Clone, Serialize)]
pub struct CalculationInput {
    pub gamemode: Gamemode,
    pub method: CalculationMethod,
    pub beatmap_id: u32,
    pub beatmap_hash: String,
    pub osu_file: String,
    pub mods: Vec<ModEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ScoreStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalties: Option<PerformancePenalties>,
}

/// Difficulty of a beatmap under a set of mods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyAttributes {
    pub star_rating: f64,
    pub max_combo: u32,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Performance value of a play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAttributes {
    pub total: f64,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Engine response to a performance calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceCalculation {
    pub difficulty: DifficultyAttributes,
    pub performance: PerformanceAttributes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attributes_keep_engine_details() {
        let attributes: DifficultyAttributes = serde_json::from_value(json!({
            "star_rating": 5.12,
            "max_combo": 1200,
            "aim_difficulty": 2.4,
            "tap_difficulty": 2.1,
        }))
        .unwrap();

        assert_eq!(attributes.max_combo, 1200);
        assert_eq!(attributes.details.get("aim_difficulty"), Some(&json!(2.4)));
        assert_eq!(
            serde_json::to_value(&attributes).unwrap()["tap_difficulty"],
            json!(2.1)
        );
    }

    #[test]
    fn test_input_omits_absent_parts() {
        let input = CalculationInput {
            gamemode: Gamemode::Droid,
            method: CalculationMethod::Live,
            beatmap_id: 75,
            beatmap_hash: "a".repeat(32),
            osu_file: String::new(),
            mods: vec![ModEntry::new("HD")],
            statistics: None,
            penalties: None,
        };

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["gamemode"], json!("droid"));
        assert_eq!(value["method"], json!(0));
        assert_eq!(value["mods"], json!([{ "acronym": "HD" }]));
        assert!(value.get("statistics").is_none());
    }
}
