//! Cross-origin allow-list decisions.
//!
//! Requests without an `Origin` header (same-origin fetches, curl, server to
//! server) are never blocked. Browser requests are allowed only when their
//! origin is an exact member of the allow-list.

use std::collections::HashSet;

use crate::config::CorsConfig;

/// Outcome of checking a request's declared origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginDecision {
    /// No `Origin` header was sent.
    NoOrigin,
    /// The origin is on the allow-list and must be echoed back.
    Allowed(String),
    /// The origin is not allowed.
    Denied(String),
}

impl OriginDecision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, OriginDecision::Denied(_))
    }
}

/// Immutable allow-list built once at startup.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: HashSet<String>,
    allow_any: bool,
    allow_credentials: bool,
}

impl OriginPolicy {
    pub fn new<I, S>(origins: I, allow_credentials: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: HashSet<String> = origins.into_iter().map(Into::into).collect();
        Self {
            allow_any: allowed.contains("*"),
            allowed,
            allow_credentials,
        }
    }

    pub fn from_config(config: &CorsConfig) -> Self {
        Self::new(config.allowed_origins.iter().cloned(), config.allow_credentials)
    }

    pub fn allow_credentials(&self) -> bool {
        self.allow_credentials
    }

    /// Whether the allow-list contains the `*` wildcard.
    pub fn allows_any(&self) -> bool {
        self.allow_any
    }

    /// The exact origins on the allow-list.
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed
            .iter()
            .map(String::as_str)
            .filter(|origin| *origin != "*")
    }

    /// Decide whether a request carrying `origin` may proceed.
    pub fn decide(&self, origin: Option<&str>) -> OriginDecision {
        match origin {
            None => OriginDecision::NoOrigin,
            Some(origin) if self.allow_any || self.allowed.contains(origin) => {
                OriginDecision::Allowed(origin.to_string())
            }
            Some(origin) => OriginDecision::Denied(origin.to_string()),
        }
    }
}
