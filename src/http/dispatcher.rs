//! Dispatcher: hands admitted requests to the handler group owning their path.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::Uri,
    response::{IntoResponse, Response},
};

use crate::error::AdmissionError;
use crate::http::request::request_id;
use crate::observability::metrics;
use crate::routing::{PathPrefixMatcher, RouteRegistry};
use crate::security::params::{check_params, PathParams};

/// Final pipeline stage. Holds the frozen mount table.
#[derive(Debug)]
pub struct Dispatcher {
    registry: RouteRegistry,
}

impl Dispatcher {
    pub fn new(registry: RouteRegistry) -> Self {
        Self { registry }
    }

    /// Check resolved path parameters, then resolve the mount for `request`
    /// and invoke its group, or answer 404.
    ///
    /// Parameters supplied ahead of the gateway as a [`PathParams`] extension
    /// are checked here, before the mount lookup. Parameters captured by a
    /// group's own routes are checked by the guard layered on each group.
    pub async fn dispatch(&self, mut request: Request) -> Response {
        let start = Instant::now();
        let request_id = request_id(&request);
        let path = request.uri().path().to_string();

        if let Some(params) = request.extensions().get::<PathParams>() {
            let url = request
                .uri()
                .path_and_query()
                .map_or(path.as_str(), |pq| pq.as_str());
            if let Err(err) = check_params(params.iter(), url) {
                tracing::warn!(
                    request_id = %request_id,
                    path = %url,
                    error = %err,
                    "Rejected empty path parameter"
                );
                return err.into_response();
            }
        }

        let Some(entry) = self.registry.resolve(&path) else {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            return AdmissionError::NotFound {
                method: request.method().to_string(),
                path,
            }
            .into_response();
        };

        tracing::debug!(
            request_id = %request_id,
            method = %request.method(),
            path = %path,
            prefix = %entry.prefix(),
            group = %entry.group().name(),
            "Dispatching request"
        );

        let relative = relative_uri(request.uri(), entry.matcher());
        *request.uri_mut() = relative;
        let response = entry.group().call(request).await;

        metrics::record_outcome("dispatched", response.status());
        metrics::record_latency("dispatched", start);
        response
    }
}

/// Axum fallback handler wrapping [`Dispatcher::dispatch`].
pub async fn dispatch_handler(
    State(dispatcher): State<Arc<Dispatcher>>,
    request: Request,
) -> Response {
    dispatcher.dispatch(request).await
}

/// The URI as seen from inside the mount: prefix removed, query kept.
fn relative_uri(uri: &Uri, matcher: &PathPrefixMatcher) -> Uri {
    let rest = matcher.strip(uri.path());
    let path_and_query = match uri.query() {
        Some(query) => format!("{rest}?{query}"),
        None => rest.to_string(),
    };

    match Uri::builder().path_and_query(path_and_query).build() {
        Ok(relative) => relative,
        Err(err) => {
            tracing::warn!(uri = %uri, error = %err, "Could not rewrite URI for mount");
            uri.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::HandlerGroup;
    use axum::{body::Body, extract::OriginalUri, http::StatusCode, routing::get, Router};

    fn dispatcher() -> Dispatcher {
        let issues = Router::new()
            .route("/", get(|| async { "list" }))
            .route(
                "/{id}",
                get(|uri: Uri, OriginalUri(original): OriginalUri| async move {
                    format!("{uri} from {original}")
                }),
            );

        let mut registry = RouteRegistry::new(false);
        registry
            .mount("/api/issues", HandlerGroup::new("issues", issues))
            .mount_disabled("/api/admin", HandlerGroup::unavailable("admin"));
        Dispatcher::new(registry)
    }

    async fn get_text(dispatcher: &Dispatcher, uri: &str) -> (StatusCode, String) {
        let response = dispatcher
            .dispatch(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_prefix_is_stripped_for_group() {
        let (status, body) = get_text(&dispatcher(), "/api/issues/5?full=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "/5?full=1 from /5?full=1");
    }

    #[tokio::test]
    async fn test_mount_root() {
        let (status, body) = get_text(&dispatcher(), "/api/issues").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "list");
    }

    #[tokio::test]
    async fn test_unmatched_and_inactive_are_not_found() {
        let (status, body) = get_text(&dispatcher(), "/api/admin/users").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Cannot GET /api/admin/users"));

        let (status, _) = get_text(&dispatcher(), "/api/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_supplied_params_are_checked_before_lookup() {
        for uri in ["/api/admin/", "/api/unknown/", "/api/issues/?page=2"] {
            let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            request
                .extensions_mut()
                .insert(PathParams::new().with("id", "").with("other", ""));

            let response = dispatcher().dispatch(request).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {uri}");
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(
                json["error"],
                format!("Missing value for URL parameter \"id\" in {uri}")
            );
        }
    }

    #[tokio::test]
    async fn test_filled_supplied_params_pass_through() {
        let mut request = Request::builder().uri("/api/issues").body(Body::empty()).unwrap();
        request.extensions_mut().insert(PathParams::new().with("id", "5"));

        let response = dispatcher().dispatch(request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_relative_uri() {
        let matcher = PathPrefixMatcher::new("/api/citizen", false);
        let uri: Uri = "/api/citizen/123/reports?page=2".parse().unwrap();
        assert_eq!(relative_uri(&uri, &matcher), "/123/reports?page=2");
    }
}
