//! Request extraction helpers
//!
//! [`JsonBody`] replaces axum's `Json` extractor so that every malformed body
//! is reported as a 400 with a message the client can act on.

use std::collections::HashMap;

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use super::error::ApiError;
use crate::validator::Validator;

/// Largest request body accepted, in bytes
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// JSON request body with descriptive rejections
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|_| {
                ApiError::bad_request(format!(
                    "body must not be larger than {} bytes",
                    MAX_BODY_BYTES
                ))
            })?;

        decode_json(&bytes).map(JsonBody)
    }
}

/// Decode exactly one JSON value from `bytes`
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let Some(start) = bytes.iter().position(|b| !b.is_ascii_whitespace()) else {
        return Err(ApiError::bad_request("body must not be empty"));
    };

    // derived struct visitors also accept arrays, filling fields by position
    if bytes[start] == b'[' {
        let (line, column) = line_column(bytes, start);
        return Err(ApiError::bad_request(format!(
            "body contains incorrect JSON type (at line {} column {})",
            line, column
        )));
    }

    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = T::deserialize(&mut de).map_err(describe_json_error)?;
    de.end()
        .map_err(|_| ApiError::bad_request("body must only contain a single JSON value"))?;

    Ok(value)
}

fn describe_json_error(err: serde_json::Error) -> ApiError {
    let message = match err.classify() {
        Category::Syntax => format!(
            "body contains badly-formed JSON (at line {} column {})",
            err.line(),
            err.column()
        ),
        Category::Eof | Category::Io => "body contains badly-formed JSON".to_string(),
        Category::Data => match unknown_field(&err) {
            Some(field) => format!("body contains unknown key \"{}\"", field),
            None => format!(
                "body contains incorrect JSON type (at line {} column {})",
                err.line(),
                err.column()
            ),
        },
    };
    ApiError::bad_request(message)
}

/// 1-based line and column of `bytes[offset]`
fn line_column(bytes: &[u8], offset: usize) -> (usize, usize) {
    let before = &bytes[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let column = before.iter().rev().take_while(|&&b| b != b'\n').count() + 1;
    (line, column)
}

fn unknown_field(err: &serde_json::Error) -> Option<String> {
    let text = err.to_string();
    let rest = text.strip_prefix("unknown field `")?;
    rest.split('`').next().map(str::to_string)
}

/// Parse a `{id}` path segment; anything but a positive integer is a 404
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::not_found()),
    }
}

/// The `{id}` segment of a list route
///
/// Rejects with 404 when the segment is not valid UTF-8 or not a positive
/// integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListId(pub i64);

impl<S> FromRequestParts<S> for ListId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found())?;
        parse_id(&raw).map(ListId)
    }
}

/// String query parameter, or `default` when absent
pub fn read_string(qs: &HashMap<String, String>, key: &str, default: &str) -> String {
    qs.get(key)
        .filter(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

/// Integer query parameter, or `default` when absent
///
/// A present but non-integer value records "must be an integer value" on `v`
/// and yields `default`.
pub fn read_int(qs: &HashMap<String, String>, key: &str, default: i64, v: &mut Validator) -> i64 {
    let Some(raw) = qs.get(key).filter(|s| !s.is_empty()) else {
        return default;
    };

    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            v.add_error(key, "must be an integer value");
            default
        }
    }
}
