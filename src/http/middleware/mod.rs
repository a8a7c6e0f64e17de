//! Pipeline middleware, outermost first.
//!
//! ```text
//! json_body.rs   → buffer + parse JSON bodies
//! cors.rs        → origin allow-list, then tower-http CORS headers and pre-flight
//! [dispatcher]   → supplied parameter check, mount lookup
//! param_guard.rs → per group, after the group's own routing
//! ```

pub mod cors;
pub mod json_body;
pub mod param_guard;

pub use cors::{cors_layer, origin_policy};
pub use json_body::{json_body, JsonBody};
pub use param_guard::param_guard;
