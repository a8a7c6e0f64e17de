//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → registry.rs (mount table lookup)
//!     → matcher.rs (segment-aligned prefix test)
//!     → Return: matched MountEntry or None
//!
//! Mount Table Construction (at startup):
//!     MountConfig[] + HandlerCatalog
//!     → mount() / mount_disabled() in config order
//!     → Freeze as immutable RouteRegistry
//! ```
//!
//! # Design Decisions
//! - Mounts registered at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always resolves to the same group
//! - Longest prefix wins, ties go to the first registration

pub mod group;
pub mod matcher;
pub mod registry;

pub use group::{HandlerCatalog, HandlerGroup};
pub use matcher::PathPrefixMatcher;
pub use registry::{MountEntry, RegistryError, RouteRegistry};
