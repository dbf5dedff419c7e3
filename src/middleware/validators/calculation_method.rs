use serde_json::Value;

use super::{display, locate, parse_integer};
use crate::{
    constants::fields,
    error::{AppError, AppResult},
    middleware::{Interceptor, RequestParams},
    models::CalculationMethod,
};

/// Validates `calculationmethod` (0 = live, 1 = rebalance)
pub struct CalculationMethodValidator {
    required: bool,
}

impl CalculationMethodValidator {
    pub fn new() -> Self {
        Self { required: true }
    }

    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl Default for CalculationMethodValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interceptor for CalculationMethodValidator {
    fn name(&self) -> &'static str {
        "validate_calculation_method"
    }

    fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
        let Some(raw) = locate(
            params,
            fields::CALCULATION_METHOD,
            self.required,
            "Calculation method",
        )?
        else {
            return Ok(());
        };

        let method = parse_integer(&raw)
            .and_then(CalculationMethod::from_code)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid calculation method: {}. Valid methods are: {}.",
                    display(&raw),
                    CalculationMethod::valid_list()
                ))
            })?;

        params.set(fields::CALCULATION_METHOD, Value::from(u8::from(method)));
        Ok(())
    }
}
