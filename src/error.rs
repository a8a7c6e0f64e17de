//! Per-request admission failures.
//!
//! Every short-circuit in the request pipeline is expressed as an
//! [`AdmissionError`]. None of them are fatal to the process; each one
//! becomes a JSON response of the form `{ "error": "<message>" }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errors raised by the admission pipeline before a handler group runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    /// The declared `Origin` is not on the allow-list.
    #[error("CORS blocked: {0}")]
    CorsBlocked(String),

    /// A resolved path parameter has an empty value.
    #[error("Missing value for URL parameter \"{name}\" in {path}")]
    MissingParam { name: String, path: String },

    /// No active mount covers the request path.
    #[error("Cannot {method} {path}")]
    NotFound { method: String, path: String },

    /// JSON body larger than the configured limit.
    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// JSON body could not be parsed.
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    /// The body stream failed before it was fully received.
    #[error("Failed to read request body: {0}")]
    BodyRead(String),
}

impl AdmissionError {
    /// HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            AdmissionError::CorsBlocked(_) => StatusCode::FORBIDDEN,
            AdmissionError::MissingParam { .. } => StatusCode::BAD_REQUEST,
            AdmissionError::NotFound { .. } => StatusCode::NOT_FOUND,
            AdmissionError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AdmissionError::InvalidJson(_) | AdmissionError::BodyRead(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Short label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            AdmissionError::CorsBlocked(_) => "cors_denied",
            AdmissionError::MissingParam { .. } => "invalid_params",
            AdmissionError::NotFound { .. } => "not_found",
            AdmissionError::PayloadTooLarge { .. } => "body_too_large",
            AdmissionError::InvalidJson(_) => "invalid_body",
            AdmissionError::BodyRead(_) => "body_unreadable",
        }
    }
}

impl IntoResponse for AdmissionError {
    fn into_response(self) -> Response {
        crate::observability::metrics::record_outcome(self.outcome(), self.status());
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            AdmissionError::CorsBlocked("http://evil.example".into()).to_string(),
            "CORS blocked: http://evil.example"
        );
        assert_eq!(
            AdmissionError::MissingParam {
                name: "id".into(),
                path: "/api/citizen/".into(),
            }
            .to_string(),
            "Missing value for URL parameter \"id\" in /api/citizen/"
        );
        assert_eq!(
            AdmissionError::NotFound {
                method: "GET".into(),
                path: "/api/unknown".into(),
            }
            .to_string(),
            "Cannot GET /api/unknown"
        );
    }

    #[tokio::test]
    async fn test_into_response_payload() {
        let response = AdmissionError::CorsBlocked("http://x.test".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "CORS blocked: http://x.test");
    }
}
