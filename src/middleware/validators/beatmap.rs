use serde_json::Value;

use super::{locate, parse_integer};
use crate::{
    constants::{fields, BEATMAP_HASH_LENGTH},
    error::{AppError, AppResult},
    middleware::{Interceptor, RequestParams},
};

/// Validates `beatmapid` as a positive integer
pub struct BeatmapIdValidator {
    required: bool,
}

impl BeatmapIdValidator {
    pub fn new() -> Self {
        Self { required: true }
    }

    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl Default for BeatmapIdValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interceptor for BeatmapIdValidator {
    fn name(&self) -> &'static str {
        "validate_beatmap_id"
    }

    fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
        let Some(raw) = locate(params, fields::BEATMAP_ID, self.required, "Beatmap ID")? else {
            return Ok(());
        };

        let id = parse_integer(&raw)
            .ok_or_else(|| AppError::validation("Beatmap ID must be an integer."))?;
        if id < 1 || id > i64::from(u32::MAX) {
            return Err(AppError::validation("Beatmap ID must be a positive integer."));
        }

        params.set(fields::BEATMAP_ID, Value::from(id));
        Ok(())
    }
}

/// Validates `beatmaphash` as a 32-character hexadecimal MD5 digest
pub struct BeatmapHashValidator {
    required: bool,
}

impl BeatmapHashValidator {
    pub fn new() -> Self {
        Self { required: true }
    }

    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl Default for BeatmapHashValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interceptor for BeatmapHashValidator {
    fn name(&self) -> &'static str {
        "validate_beatmap_hash"
    }

    fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
        let Some(raw) = locate(params, fields::BEATMAP_HASH, self.required, "Beatmap hash")?
        else {
            return Ok(());
        };

        let hash = raw
            .as_str()
            .filter(|s| s.len() == BEATMAP_HASH_LENGTH && hex::decode(s).is_ok())
            .ok_or_else(|| {
                AppError::validation("Beatmap hash must be 32 hexadecimal characters.")
            })?
            .to_ascii_lowercase();

        params.set(fields::BEATMAP_HASH, Value::from(hash));
        Ok(())
    }
}
