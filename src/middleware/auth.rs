//! Shared-secret authentication

use serde_json::Value;
use tracing::debug;

use super::{chain::Interceptor, params::RequestParams};
use crate::{
    constants::fields,
    error::{AppError, AppResult},
};

/// Rejects requests whose `key` field does not equal the configured secret
pub struct Authenticate {
    secret: String,
}

impl Authenticate {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl Interceptor for Authenticate {
    fn name(&self) -> &'static str {
        "authenticate"
    }

    fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
        match params.get(fields::KEY) {
            Some(Value::String(key)) if constant_time_eq(key.as_bytes(), self.secret.as_bytes()) => {
                Ok(())
            }
            provided => {
                debug!(key_present = provided.is_some(), "Auth failed: invalid internal key");
                Err(AppError::InvalidKey)
            }
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
