//! Per-request parameter bag
//!
//! Read-style calls carry their parameters in the query string, write-style
//! calls in the body. Interceptors read and overwrite fields of the active
//! bag in place, so by the time a handler runs every validated field holds
//! its typed value.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Query, Request},
    http::{header::CONTENT_TYPE, Method},
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Where a route reads its parameters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStyle {
    /// Query parameters
    Read,
    /// Body fields
    Write,
}

impl CallStyle {
    pub fn from_method(method: &Method) -> Self {
        if [Method::GET, Method::HEAD, Method::DELETE, Method::OPTIONS].contains(method) {
            Self::Read
        } else {
            Self::Write
        }
    }
}

/// Parameters of one request
#[derive(Debug, Clone)]
pub struct RequestParams {
    style: CallStyle,
    query: Map<String, Value>,
    body: Map<String, Value>,
}

impl RequestParams {
    pub fn new(style: CallStyle, query: Map<String, Value>, body: Map<String, Value>) -> Self {
        Self { style, query, body }
    }

    /// Read-style parameters from a query bag
    pub fn read(query: Map<String, Value>) -> Self {
        Self::new(CallStyle::Read, query, Map::new())
    }

    /// Write-style parameters from a body bag
    pub fn write(body: Map<String, Value>) -> Self {
        Self::new(CallStyle::Write, Map::new(), body)
    }

    /// Extract the query string and, for write-style calls, the body
    pub async fn from_request(style: CallStyle, request: Request) -> AppResult<Self> {
        let query = Query::<HashMap<String, String>>::try_from_uri(request.uri())
            .map_err(|_| AppError::validation("Malformed query string."))?
            .0
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();

        let body = match style {
            CallStyle::Read => Map::new(),
            CallStyle::Write => read_body(request).await?,
        };

        Ok(Self::new(style, query, body))
    }

    pub fn style(&self) -> CallStyle {
        self.style
    }

    /// The bag this request's interceptors operate on
    pub fn fields(&self) -> &Map<String, Value> {
        match self.style {
            CallStyle::Read => &self.query,
            CallStyle::Write => &self.body,
        }
    }

    pub fn fields_mut(&mut self) -> &mut Map<String, Value> {
        match self.style {
            CallStyle::Read => &mut self.query,
            CallStyle::Write => &mut self.body,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields().get(field)
    }

    /// Field value, treating `null` and empty strings as absent
    pub fn present(&self, field: &str) -> Option<&Value> {
        match self.get(field)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            value => Some(value),
        }
    }

    /// Overwrite a field with its validated value
    pub fn set(&mut self, field: &str, value: Value) {
        self.fields_mut().insert(field.to_string(), value);
    }

    /// Deserialize the active bag into a typed request.
    ///
    /// Absent fields (see [`present`](Self::present)) are left out, so they
    /// land in `Option` fields as `None`.
    pub fn decode<T: DeserializeOwned>(&self) -> AppResult<T> {
        let fields = self
            .fields()
            .iter()
            .filter(|(field, _)| self.present(field).is_some())
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();

        serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::validation(format!("Malformed request parameters: {e}.")))
    }
}

async fn read_body(request: Request) -> AppResult<Map<String, Value>> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(form) = Form::<HashMap<String, String>>::from_request(request, &())
            .await
            .map_err(|_| AppError::validation("Malformed form body."))?;

        return Ok(form
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect());
    }

    if !content_type.is_empty() && !content_type.contains("json") {
        return Err(AppError::validation("Unsupported request body."));
    }

    let bytes = Bytes::from_request(request, &())
        .await
        .map_err(|_| AppError::validation("Unreadable request body."))?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AppError::validation("Request body must be a JSON object.")),
    }
}
