//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the mount table and origin policy from configuration
//! - Wire the admission pipeline as middleware layers
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests
//!
//! # Pipeline (outermost first)
//! ```text
//! request id → trace → JSON body → origin policy → CORS headers
//!     → dispatcher (parameter check → mount lookup)
//!     → group router → parameter guard → handler
//! ```

use std::sync::Arc;

use axum::{middleware, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, GatewayConfig};
use crate::http::dispatcher::{dispatch_handler, Dispatcher};
use crate::http::middleware::{cors_layer, json_body, origin_policy};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::routing::{HandlerCatalog, RegistryError, RouteRegistry};
use crate::security::OriginPolicy;

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server, mounting groups from `catalog` per the
    /// configured mount table.
    pub fn new(config: GatewayConfig, catalog: HandlerCatalog) -> Result<Self, ServerError> {
        let registry = RouteRegistry::from_config(
            &config.mounts,
            &catalog,
            config.routing.case_sensitive,
        )?;
        let policy = OriginPolicy::from_config(&config.cors);

        tracing::info!(
            mounts = registry.len(),
            allowed_origins = config.cors.allowed_origins.len(),
            "Mount table ready"
        );

        let router = Self::build_router(&config, Dispatcher::new(registry), policy);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, dispatcher: Dispatcher, policy: OriginPolicy) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(Arc::new(dispatcher))
            .layer(cors_layer(&policy))
            .layer(middleware::from_fn_with_state(Arc::new(policy), origin_policy))
            .layer(middleware::from_fn_with_state(config.body.clone(), json_body))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain and return.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
