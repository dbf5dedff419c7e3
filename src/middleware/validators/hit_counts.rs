use super::non_negative_integer;
use crate::{
    constants::fields,
    error::{AppError, AppResult},
    middleware::{Interceptor, RequestParams},
};

/// Validates `n300`, `n100`, `n50` and `nmiss` as one group.
///
/// The four counters are supplied together or not at all.
pub struct HitCountsValidator {
    required: bool,
}

impl HitCountsValidator {
    pub fn new() -> Self {
        Self { required: true }
    }

    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl Default for HitCountsValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interceptor for HitCountsValidator {
    fn name(&self) -> &'static str {
        "validate_hit_counts"
    }

    fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
        let supplied = fields::HIT_COUNTS
            .iter()
            .filter(|field| params.present(field).is_some())
            .count();

        match supplied {
            0 if self.required => Err(AppError::validation(
                "Hit counts (n300, n100, n50, nmiss) must be provided.",
            )),
            0 => Ok(()),
            n if n < fields::HIT_COUNTS.len() => Err(AppError::validation(
                "n300, n100, n50, and nmiss must be provided together.",
            )),
            _ => fields::HIT_COUNTS
                .iter()
                .try_for_each(|field| non_negative_integer(params, field, true, field)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::validators::test_support::body;
    use serde_json::json;

    #[test]
    fn test_all_four_coerced() {
        let mut params = body(json!({ "n300": "500", "n100": "12", "n50": "0", "nmiss": 3 }));
        HitCountsValidator::new().intercept(&mut params).unwrap();
        assert_eq!(params.get("n300"), Some(&json!(500)));
        assert_eq!(params.get("n100"), Some(&json!(12)));
        assert_eq!(params.get("n50"), Some(&json!(0)));
        assert_eq!(params.get("nmiss"), Some(&json!(3)));
    }

    #[test]
    fn test_partial_set_rejected() {
        let err = HitCountsValidator::optional()
            .intercept(&mut body(json!({ "n300": "500", "nmiss": "1" })))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "n300, n100, n50, and nmiss must be provided together."
        );
    }

    #[test]
    fn test_none_supplied() {
        assert!(HitCountsValidator::optional()
            .intercept(&mut body(json!({})))
            .is_ok());

        let err = HitCountsValidator::new()
            .intercept(&mut body(json!({})))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Hit counts (n300, n100, n50, nmiss) must be provided."
        );
    }

    #[test]
    fn test_negative_counter_names_field() {
        let err = HitCountsValidator::new()
            .intercept(&mut body(json!({ "n300": "1", "n100": "-2", "n50": "0", "nmiss": "0" })))
            .unwrap_err();
        assert_eq!(err.to_string(), "n100 must be a non-negative integer.");
    }

    #[test]
    fn test_idempotent() {
        let validator = HitCountsValidator::new();
        let mut params = body(json!({ "n300": "1", "n100": "2", "n50": "3", "nmiss": "4" }));
        validator.intercept(&mut params).unwrap();
        let once = params.fields().clone();
        validator.intercept(&mut params).unwrap();
        assert_eq!(params.fields(), &once);
    }
}
