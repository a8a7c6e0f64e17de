//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{OriginalUri, Path, Request},
    http::{HeaderMap, StatusCode},
    routing::{any, get as get_route},
    Extension, Json, Router,
};
use civic_gateway::config::GatewayConfig;
use civic_gateway::http::middleware::JsonBody;
use civic_gateway::{HandlerCatalog, HandlerGroup, HttpServer};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// A group that echoes what it received and counts invocations.
pub fn recording_group(name: &'static str, hits: Arc<AtomicUsize>) -> HandlerGroup {
    let root_hits = hits.clone();
    let report_hits = hits.clone();
    let router = Router::new()
        .route(
            "/",
            any(move |body: Option<Extension<JsonBody>>| {
                root_hits.fetch_add(1, Ordering::SeqCst);
                async move {
                    let body = body.map(|Extension(JsonBody(value))| value);
                    Json(json!({ "group": name, "body": body }))
                }
            }),
        )
        .route(
            "/{id}",
            get_route(move |Path(id): Path<String>, OriginalUri(original): OriginalUri| {
                hits.fetch_add(1, Ordering::SeqCst);
                async move {
                    Json(json!({ "group": name, "id": id, "original": original.to_string() }))
                }
            }),
        )
        .route(
            "/{id}/reports",
            get_route(move |Path(id): Path<String>| {
                report_hits.fetch_add(1, Ordering::SeqCst);
                async move { Json(json!({ "group": name, "id": id, "reports": [] })) }
            }),
        );
    HandlerGroup::new(name, router)
}

/// Catalog with a recording group for every default mount.
pub fn recording_catalog(hits: &Arc<AtomicUsize>) -> HandlerCatalog {
    ["auth", "sector-head", "citizen", "issues", "feedback", "request", "admin"]
        .into_iter()
        .fold(HandlerCatalog::new(), |catalog, name| {
            catalog.with(recording_group(name, hits.clone()))
        })
}

#[allow(dead_code)]
/// The full gateway router over the default configuration.
pub fn gateway(hits: &Arc<AtomicUsize>) -> Router {
    HttpServer::new(GatewayConfig::default(), recording_catalog(hits))
        .expect("default configuration must build")
        .router()
}

#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

#[allow(dead_code)]
/// Send `request` through `router` and decode a JSON body if there is one.
pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse {
        status,
        headers,
        json,
    }
}

#[allow(dead_code)]
pub fn get(uri: &str, origin: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(origin) = origin {
        builder = builder.header("origin", origin);
    }
    builder.body(Body::empty()).unwrap()
}
