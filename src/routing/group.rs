//! Handler groups: opaque units of request handling bound to a mount prefix.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware,
    response::Response,
    Json, Router,
};
use tower::ServiceExt;

use crate::http::middleware::param_guard::param_guard;

/// An externally supplied set of routes mounted under a prefix.
///
/// The gateway never looks inside a group. It only hands it requests whose
/// URI has been rewritten relative to the mount prefix. Every group is
/// wrapped with the parameter guard, which runs after the group's own
/// routing has resolved path parameters and before any of its handlers.
#[derive(Clone)]
pub struct HandlerGroup {
    name: Arc<str>,
    router: Router,
}

impl HandlerGroup {
    pub fn new(name: impl Into<Arc<str>>, router: Router) -> Self {
        Self {
            name: name.into(),
            router: router.layer(middleware::from_fn(param_guard)),
        }
    }

    /// A group that answers every request with `501 Not Implemented`.
    pub fn unavailable(name: impl Into<Arc<str>>) -> Self {
        let name: Arc<str> = name.into();
        let message = format!("Handler group \"{name}\" is not available");
        let router = Router::new().fallback(move || {
            let message = message.clone();
            async move {
                (
                    StatusCode::NOT_IMPLEMENTED,
                    Json(serde_json::json!({ "error": message })),
                )
            }
        });
        Self::new(name, router)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the group. Whatever the group responds is returned untouched.
    pub async fn call(&self, request: Request) -> Response {
        match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

impl fmt::Debug for HandlerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerGroup")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Named handler groups available for mounting.
#[derive(Debug, Clone, Default)]
pub struct HandlerCatalog {
    groups: HashMap<String, HandlerGroup>,
}

impl HandlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group under its own name, replacing any previous one.
    pub fn register(&mut self, group: HandlerGroup) -> &mut Self {
        self.groups.insert(group.name().to_string(), group);
        self
    }

    pub fn with(mut self, group: HandlerGroup) -> Self {
        self.register(group);
        self
    }

    pub fn get(&self, name: &str) -> Option<&HandlerGroup> {
        self.groups.get(name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
