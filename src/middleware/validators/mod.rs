//! Parameter validators
//!
//! Every validator follows the same contract: find its field in the active
//! parameter bag, reject with 400 when a required field is absent or a
//! present field does not parse, otherwise overwrite the field with the
//! typed value. Validators accept their own output, so running one twice
//! leaves the bag unchanged.

mod beatmap;
mod calculation_method;
mod combo;
mod gamemode;
mod hit_counts;
mod mods;
mod penalty;
mod slider;

pub use beatmap::{BeatmapHashValidator, BeatmapIdValidator};
pub use calculation_method::CalculationMethodValidator;
pub use combo::MaxComboValidator;
pub use gamemode::GamemodeValidator;
pub use hit_counts::HitCountsValidator;
pub use mods::ModsValidator;
pub use penalty::{Penalty, PenaltyValidator};
pub use slider::SliderCountsValidator;

use serde_json::Value;

use super::params::RequestParams;
use crate::error::{AppError, AppResult};

/// Clone of a field's raw value, or the "must be provided" rejection.
///
/// `Ok(None)` means the field is absent and optional.
fn locate(
    params: &RequestParams,
    field: &str,
    required: bool,
    label: &str,
) -> AppResult<Option<Value>> {
    match params.present(field) {
        Some(value) => Ok(Some(value.clone())),
        None if required => Err(AppError::validation(format!("{label} must be provided."))),
        None => Ok(None),
    }
}

/// Strict integer parse of a string or JSON number
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text of a raw value for error messages
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validate a non-negative integer field that fits a `u32` and store it as
/// a number
fn non_negative_integer(
    params: &mut RequestParams,
    field: &str,
    required: bool,
    label: &str,
) -> AppResult<()> {
    let Some(raw) = locate(params, field, required, label)? else {
        return Ok(());
    };

    let value = parse_integer(&raw)
        .ok_or_else(|| AppError::validation(format!("{label} must be an integer.")))?;
    if value < 0 {
        return Err(AppError::validation(format!(
            "{label} must be a non-negative integer."
        )));
    }
    let value = u32::try_from(value).map_err(|_| {
        AppError::validation(format!("{label} must not exceed {}.", u32::MAX))
    })?;

    params.set(field, Value::from(value));
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_integer_is_strict() {
        assert_eq!(parse_integer(&json!("42")), Some(42));
        assert_eq!(parse_integer(&json!(" 42 ")), Some(42));
        assert_eq!(parse_integer(&json!(-5)), Some(-5));
        assert_eq!(parse_integer(&json!("42abc")), None);
        assert_eq!(parse_integer(&json!("4.2")), None);
        assert_eq!(parse_integer(&json!(4.2)), None);
        assert_eq!(parse_integer(&json!(true)), None);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float(&json!("0.5")), Some(0.5));
        assert_eq!(parse_float(&json!(1)), Some(1.0));
        assert!(parse_float(&json!("NaN")).unwrap().is_nan());
        assert_eq!(parse_float(&json!("half")), None);
    }
}
