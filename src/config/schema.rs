//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults so an empty file yields a working setup.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Cross-origin allow-list.
    pub cors: CorsConfig,

    /// JSON body parsing limits.
    pub body: BodyConfig,

    /// Prefix matching behaviour.
    pub routing: RoutingConfig,

    /// Ordered mount table. Order is significant for tie-breaking.
    pub mounts: Vec<MountConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            cors: CorsConfig::default(),
            body: BodyConfig::default(),
            routing: RoutingConfig::default(),
            mounts: default_mounts(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Cross-origin policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins (`scheme://host[:port]`) allowed to call the API.
    pub allowed_origins: Vec<String>,

    /// Whether credentials (cookies, auth headers) may flow cross-origin.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "https://civicconnect-nfew.onrender.com".to_string(),
            ],
            allow_credentials: true,
        }
    }
}

/// JSON body parser configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Maximum JSON body size in bytes.
    pub max_bytes: usize,

    /// Only accept objects and arrays at the top level.
    pub strict: bool,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            max_bytes: 100 * 1024,
            strict: true,
        }
    }
}

/// Route matching configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Match mount prefixes case-sensitively. Off by default.
    pub case_sensitive: bool,
}

/// A single entry of the mount table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MountConfig {
    /// Path prefix, e.g. `/api/citizen`.
    pub prefix: String,

    /// Name of the handler group serving this prefix.
    pub group: String,

    /// Inactive entries stay in the table but never receive traffic.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl MountConfig {
    pub fn new(prefix: impl Into<String>, group: impl Into<String>, active: bool) -> Self {
        Self {
            prefix: prefix.into(),
            group: group.into(),
            active,
        }
    }
}

fn default_active() -> bool {
    true
}

/// The production mount table. `/api/admin` is configured but disabled.
pub fn default_mounts() -> Vec<MountConfig> {
    vec![
        MountConfig::new("/api/auth", "auth", true),
        MountConfig::new("/api/sector-head", "sector-head", true),
        MountConfig::new("/api/citizen", "citizen", true),
        MountConfig::new("/api/issues", "issues", true),
        MountConfig::new("/api/feedback", "feedback", true),
        MountConfig::new("/api/request", "request", true),
        MountConfig::new("/api/admin", "admin", false),
    ]
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
