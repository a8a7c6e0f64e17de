//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer stack)
//!     → request.rs (request ID)
//!     → middleware/json_body.rs (parse JSON bodies)
//!     → middleware/cors.rs (origin policy, CORS headers, pre-flight)
//!     → dispatcher.rs (parameter check, mount lookup, prefix stripping)
//!     → handler group (guarded by middleware/param_guard.rs)
//!     → Send to client
//! ```

pub mod dispatcher;
pub mod middleware;
pub mod request;
pub mod server;

pub use dispatcher::Dispatcher;
pub use request::X_REQUEST_ID;
pub use server::{HttpServer, ServerError};
