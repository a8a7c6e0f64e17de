//! JSON body parsing, the first stage of the pipeline.
//!
//! Only engages for JSON content types. The body is buffered up to the
//! configured limit, parsed once, and attached as a [`JsonBody`] extension;
//! the raw bytes are put back so handler groups can still extract it.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use serde_json::Value;
use std::error::Error as StdError;

use crate::config::BodyConfig;
use crate::error::AdmissionError;

/// The parsed JSON body of a request.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

pub async fn json_body(State(config): State<BodyConfig>, request: Request, next: Next) -> Response {
    if !is_json(request.headers()) {
        return next.run(request).await;
    }

    let limit = config.max_bytes;
    if content_length(request.headers()).is_some_and(|len| len > limit) {
        return AdmissionError::PayloadTooLarge { limit }.into_response();
    }

    let (mut parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(err) if exceeds_limit(&err) => {
            tracing::debug!(error = %err, limit, "JSON body over limit");
            return AdmissionError::PayloadTooLarge { limit }.into_response();
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to buffer JSON body");
            return AdmissionError::BodyRead(err.to_string()).into_response();
        }
    };

    if !bytes.iter().all(u8::is_ascii_whitespace) {
        let value: Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => return AdmissionError::InvalidJson(err.to_string()).into_response(),
        };
        if config.strict && !(value.is_object() || value.is_array()) {
            return AdmissionError::InvalidJson(
                "top-level value must be an object or array".to_string(),
            )
            .into_response();
        }
        parts.extensions.insert(JsonBody(value));
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Whether a buffering failure came from the length limit rather than the
/// underlying stream.
fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(err) = source {
        if err.is::<LengthLimitError>() {
            return true;
        }
        source = err.source();
    }
    false
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}
