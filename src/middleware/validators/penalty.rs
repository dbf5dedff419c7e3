use serde_json::Value;

use super::{locate, parse_float};
use crate::{
    constants::fields,
    error::{AppError, AppResult},
    middleware::{Interceptor, RequestParams},
};

/// Performance penalties a caller may override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Penalty {
    AimSliderCheese,
    Tap,
    FlashlightSliderCheese,
    VisualSliderCheese,
}

impl Penalty {
    pub fn field(&self) -> &'static str {
        match self {
            Self::AimSliderCheese => fields::AIM_SLIDER_CHEESE_PENALTY,
            Self::Tap => fields::TAP_PENALTY,
            Self::FlashlightSliderCheese => fields::FLASHLIGHT_SLIDER_CHEESE_PENALTY,
            Self::VisualSliderCheese => fields::VISUAL_SLIDER_CHEESE_PENALTY,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::AimSliderCheese => "Aim slider cheese penalty",
            Self::Tap => "Tap penalty",
            Self::FlashlightSliderCheese => "Flashlight slider cheese penalty",
            Self::VisualSliderCheese => "Visual slider cheese penalty",
        }
    }

    /// Slider cheese penalties are multipliers in [0, 1]; the tap penalty
    /// is a divisor and must be at least 1.
    pub fn accepts(&self, value: f64) -> bool {
        match self {
            Self::Tap => value.is_finite() && value >= 1.0,
            _ => (0.0..=1.0).contains(&value),
        }
    }

    fn range_message(&self) -> String {
        match self {
            Self::Tap => format!("{} must be a finite number of at least 1.", self.label()),
            _ => format!("{} must be a number between 0 and 1.", self.label()),
        }
    }
}

/// Validates one penalty field as a float in its allowed range
pub struct PenaltyValidator {
    penalty: Penalty,
    required: bool,
}

impl PenaltyValidator {
    pub fn new(penalty: Penalty) -> Self {
        Self {
            penalty,
            required: true,
        }
    }

    pub fn optional(penalty: Penalty) -> Self {
        Self {
            penalty,
            required: false,
        }
    }
}

impl Interceptor for PenaltyValidator {
    fn name(&self) -> &'static str {
        match self.penalty {
            Penalty::AimSliderCheese => "validate_aim_slider_cheese_penalty",
            Penalty::Tap => "validate_tap_penalty",
            Penalty::FlashlightSliderCheese => "validate_flashlight_slider_cheese_penalty",
            Penalty::VisualSliderCheese => "validate_visual_slider_cheese_penalty",
        }
    }

    fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
        let field = self.penalty.field();
        let Some(raw) = locate(params, field, self.required, self.penalty.label())? else {
            return Ok(());
        };

        let value = parse_float(&raw)
            .filter(|v| self.penalty.accepts(*v))
            .ok_or_else(|| AppError::validation(self.penalty.range_message()))?;

        params.set(field, Value::from(value));
        Ok(())
    }
}
