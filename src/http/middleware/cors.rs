//! Origin policy middleware.
//!
//! [`origin_policy`] rejects requests from origins outside the allow-list
//! before anything else sees them. Allowed requests continue into the
//! [`cors_layer`], which echoes the origin and answers pre-flight `OPTIONS`
//! requests on every path without touching a handler group.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::error::AdmissionError;
use crate::observability::metrics;
use crate::security::origin::{OriginDecision, OriginPolicy};

const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::POST,
    Method::DELETE,
];

/// Access-control headers and pre-flight answers for admitted requests.
///
/// Must sit inside [`origin_policy`] so denied origins never reach it.
pub fn cors_layer(policy: &OriginPolicy) -> CorsLayer {
    let allow_origin = if policy.allows_any() {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(policy.origins().filter_map(|origin| {
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(origin, error = %err, "Skipping unusable allowed origin");
                    None
                }
            }
        }))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(policy.allow_credentials())
}

pub async fn origin_policy(
    State(policy): State<Arc<OriginPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let declared = request
        .headers()
        .get(header::ORIGIN)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    if let OriginDecision::Denied(origin) = policy.decide(declared.as_deref()) {
        tracing::warn!(
            origin = %origin,
            method = %request.method(),
            path = %request.uri().path(),
            "CORS blocked"
        );
        return AdmissionError::CorsBlocked(origin).into_response();
    }

    if request.method() != Method::OPTIONS {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), origin = ?declared, "Answering pre-flight");
    let mut response = next.run(request).await;
    *response.status_mut() = StatusCode::NO_CONTENT;
    metrics::record_outcome("preflight", StatusCode::NO_CONTENT);
    response
}
