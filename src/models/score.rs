//! Score model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{HitCounts, ModEntry, ScoreStatistics};
use crate::error::{AppError, AppResult};

/// Score database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Score {
    pub id: i64,
    pub uid: i32,
    pub hash: String,
    /// JSON-encoded mod list
    pub mods: String,
    pub score: i64,
    pub combo: i32,
    pub n300: i32,
    pub n100: i32,
    pub n50: i32,
    pub nmiss: i32,
    pub slider_ticks_missed: Option<i32>,
    pub slider_ends_dropped: Option<i32>,
    pub date: DateTime<Utc>,
}

impl Score {
    /// Statistics in calculation form
    pub fn statistics(&self) -> ScoreStatistics {
        let count = |v: i32| u32::try_from(v).unwrap_or(0);

        ScoreStatistics {
            max_combo: Some(count(self.combo)),
            hits: Some(HitCounts {
                n300: count(self.n300),
                n100: count(self.n100),
                n50: count(self.n50),
                nmiss: count(self.nmiss),
            }),
            slider_ticks_missed: self.slider_ticks_missed.map(count),
            slider_ends_dropped: self.slider_ends_dropped.map(count),
        }
    }

    pub fn mod_entries(&self) -> AppResult<Vec<ModEntry>> {
        if self.mods.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&self.mods).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("score {} has malformed mods: {e}", self.id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(mods: &str) -> Score {
        Score {
            id: 1,
            uid: 51076,
            hash: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
            mods: mods.to_string(),
            score: 1_000_000,
            combo: 812,
            n300: 600,
            n100: 5,
            n50: 1,
            nmiss: -1,
            slider_ticks_missed: Some(2),
            slider_ends_dropped: None,
            date: Utc::now(),
        }
    }

    #[test]
    fn test_statistics_clamp_negative_counts() {
        let stats = score("[]").statistics();
        assert_eq!(stats.max_combo, Some(812));
        assert_eq!(stats.hits.unwrap().nmiss, 0);
        assert_eq!(stats.slider_ticks_missed, Some(2));
        assert_eq!(stats.slider_ends_dropped, None);
    }

    #[test]
    fn test_mod_entries() {
        let mods = score(r#"[{"acronym":"HD"},{"acronym":"DT"}]"#).mod_entries().unwrap();
        assert_eq!(mods, vec![ModEntry::new("HD"), ModEntry::new("DT")]);
        assert!(score("").mod_entries().unwrap().is_empty());
        assert!(score("HDDT").mod_entries().is_err());
    }
}
