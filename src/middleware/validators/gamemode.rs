use serde_json::Value;

use super::{display, locate};
use crate::{
    constants::fields,
    error::{AppError, AppResult},
    middleware::{Interceptor, RequestParams},
    models::Gamemode,
};

/// Validates `gamemode` against the supported modes
pub struct GamemodeValidator {
    required: bool,
}

impl GamemodeValidator {
    pub fn new() -> Self {
        Self { required: true }
    }

    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl Default for GamemodeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interceptor for GamemodeValidator {
    fn name(&self) -> &'static str {
        "validate_gamemode"
    }

    fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
        let Some(raw) = locate(params, fields::GAMEMODE, self.required, "Gamemode")? else {
            return Ok(());
        };

        let mode = raw
            .as_str()
            .and_then(|s| s.parse::<Gamemode>().ok())
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid gamemode: {}. Valid modes are: {}.",
                    display(&raw),
                    Gamemode::valid_list()
                ))
            })?;

        params.set(fields::GAMEMODE, Value::from(mode.as_str()));
        Ok(())
    }
}
