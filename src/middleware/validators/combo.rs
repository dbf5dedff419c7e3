use super::non_negative_integer;
use crate::{
    constants::fields,
    error::AppResult,
    middleware::{Interceptor, RequestParams},
};

/// Validates `maxcombo` as a non-negative integer
pub struct MaxComboValidator {
    required: bool,
}

impl MaxComboValidator {
    pub fn new() -> Self {
        Self { required: true }
    }

    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl Default for MaxComboValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interceptor for MaxComboValidator {
    fn name(&self) -> &'static str {
        "validate_max_combo"
    }

    fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
        non_negative_integer(params, fields::MAX_COMBO, self.required, "Max combo")
    }
}
