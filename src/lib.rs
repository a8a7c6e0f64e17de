//! CivicConnect API gateway library.
//!
//! Every request passes the same admission pipeline before reaching one of
//! the handler groups mounted under `/api/...`:
//!
//! ```text
//! JSON body parser → origin policy → parameter guard → mount lookup → group
//! ```
//!
//! Parameters captured by a group's own routes are guarded again inside the
//! group, before any of its handlers:
//!
//! ```text
//! group router → parameter guard → handler
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::GatewayConfig;
pub use error::AdmissionError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{HandlerCatalog, HandlerGroup};
