//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → origin.rs (allow-list decision on the Origin header)
//!     → params.rs (reject empty path parameters)
//!     → Pass to handler group
//! ```
//!
//! # Design Decisions
//! - Pure decision functions; the HTTP adapters live in `http::middleware`
//! - Fail closed: an origin that is present but unlisted is rejected
//! - No trust in client input

pub mod origin;
pub mod params;

pub use origin::{OriginDecision, OriginPolicy};
pub use params::{check_params, PathParams};
