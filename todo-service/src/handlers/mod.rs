//! HTTP handlers for the `/v1` API
//!
//! - [`lists`]: create, show, replace, update, delete and search lists
//! - [`health`]: liveness report
//! - [`ApiError`]: every failure, rendered as `{"error", "code", "status"}`
//! - [`JsonBody`]: JSON extractor with descriptive 400 rejections

mod error;
mod extract;
mod response;

pub mod health;
pub mod lists;

pub use error::{ApiError, ApiErrorKind, ErrorDetail, ErrorResponse};
pub use extract::{
    decode_json, parse_id, read_int, read_string, JsonBody, ListId, MAX_BODY_BYTES,
};
pub use response::{ListEnvelope, ListsEnvelope, MessageEnvelope};
