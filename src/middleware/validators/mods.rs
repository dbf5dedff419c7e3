use serde_json::Value;

use super::locate;
use crate::{
    constants::fields,
    error::{AppError, AppResult},
    middleware::{Interceptor, RequestParams},
};

/// Validates `mods` as a JSON array of objects that each carry an `acronym`.
///
/// Query strings and form bodies deliver the array as JSON text; it is
/// parsed and stored back as an array.
pub struct ModsValidator {
    required: bool,
}

impl ModsValidator {
    pub fn new() -> Self {
        Self { required: true }
    }

    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl Default for ModsValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interceptor for ModsValidator {
    fn name(&self) -> &'static str {
        "validate_mods"
    }

    fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
        let Some(raw) = locate(params, fields::MODS, self.required, "Mods")? else {
            return Ok(());
        };

        let parsed = match raw {
            Value::String(text) => serde_json::from_str::<Value>(&text)
                .map_err(|_| AppError::validation("Mods must be a JSON array."))?,
            other => other,
        };

        let Value::Array(mods) = parsed else {
            return Err(AppError::validation("Mods must be a JSON array."));
        };

        let well_formed = mods.iter().all(|m| {
            m.get("acronym")
                .and_then(Value::as_str)
                .is_some_and(|acronym| !acronym.is_empty())
        });
        if !well_formed {
            return Err(AppError::validation(
                "Each mod must be an object with an acronym.",
            ));
        }

        params.set(fields::MODS, Value::Array(mods));
        Ok(())
    }
}
