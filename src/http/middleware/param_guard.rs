//! Parameter guard middleware.
//!
//! Attached to every handler group, after the group's router has matched a
//! route. It rejects the request with `400` when any resolved path
//! parameter is empty, naming the parameter and the full requested URL.

use axum::{
    extract::{FromRequestParts, OriginalUri, RawPathParams, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::security::params::{check_params, PathParams};

pub async fn param_guard(request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map(|original| original.0.clone())
        .unwrap_or_else(|| parts.uri.clone());
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let verdict = if let Some(params) = parts.extensions.get::<PathParams>().cloned() {
        check_params(params.iter(), &path)
    } else {
        match RawPathParams::from_request_parts(&mut parts, &()).await {
            Ok(raw) => check_params(raw.iter(), &path),
            // Fallback handlers and non-UTF-8 captures: nothing to inspect.
            Err(_) => Ok(()),
        }
    };

    if let Err(err) = verdict {
        tracing::warn!(path = %path, error = %err, "Rejected empty path parameter");
        return err.into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}
