use super::non_negative_integer;
use crate::{
    constants::fields,
    error::AppResult,
    middleware::{Interceptor, RequestParams},
};

/// Validates `sliderticksmissed` and `sliderendsdropped` as non-negative integers
pub struct SliderCountsValidator {
    required: bool,
}

impl SliderCountsValidator {
    pub fn new() -> Self {
        Self { required: true }
    }

    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl Default for SliderCountsValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interceptor for SliderCountsValidator {
    fn name(&self) -> &'static str {
        "validate_slider_counts"
    }

    fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
        non_negative_integer(
            params,
            fields::SLIDER_TICKS_MISSED,
            self.required,
            "Slider ticks missed",
        )?;
        non_negative_integer(
            params,
            fields::SLIDER_ENDS_DROPPED,
            self.required,
            "Slider ends dropped",
        )
    }
}
