//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, mount prefixes and allowed origins
//! - Detect two active mounts claiming the same prefix
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::routing::matcher::normalize_prefix;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("mount prefix {0:?} must start with '/' and must not contain '?' or '#'")]
    InvalidPrefix(String),

    #[error("mount {0:?} has an empty group name")]
    EmptyGroup(String),

    #[error("prefix {0:?} is mounted more than once")]
    DuplicatePrefix(String),

    #[error("allowed origin {0:?} must look like scheme://host[:port]")]
    InvalidOrigin(String),

    #[error("wildcard origin cannot be combined with credentials")]
    WildcardWithCredentials,

    #[error("body.max_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Check a configuration for semantic errors, collecting every one found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut seen = HashSet::new();
    for mount in &config.mounts {
        if !mount.prefix.starts_with('/') || mount.prefix.contains(['?', '#']) {
            errors.push(ValidationError::InvalidPrefix(mount.prefix.clone()));
            continue;
        }
        if mount.group.trim().is_empty() {
            errors.push(ValidationError::EmptyGroup(mount.prefix.clone()));
        }
        if mount.active {
            let key = normalize_prefix(&mount.prefix, config.routing.case_sensitive);
            if !seen.insert(key) {
                errors.push(ValidationError::DuplicatePrefix(mount.prefix.clone()));
            }
        }
    }

    for origin in &config.cors.allowed_origins {
        if origin == "*" {
            if config.cors.allow_credentials {
                errors.push(ValidationError::WildcardWithCredentials);
            }
        } else if !is_serialized_origin(origin) {
            errors.push(ValidationError::InvalidOrigin(origin.clone()));
        }
    }

    if config.body.max_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `scheme://host[:port]` with no path, query or trailing slash.
fn is_serialized_origin(origin: &str) -> bool {
    let Some((scheme, authority)) = origin.split_once("://") else {
        return false;
    };
    !scheme.is_empty()
        && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !authority.is_empty()
        && !authority.contains(['/', '?', '#', ' '])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::MountConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.body.max_bytes = 0;
        config.mounts.push(MountConfig::new("api/bad", "bad", true));
        config.cors.allowed_origins.push("http://localhost:5173/".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroBodyLimit));
        assert!(errors.contains(&ValidationError::InvalidPrefix("api/bad".into())));
        assert!(errors.contains(&ValidationError::InvalidOrigin(
            "http://localhost:5173/".into()
        )));
    }

    #[test]
    fn test_duplicate_active_prefix() {
        let mut config = GatewayConfig::default();
        config.mounts.push(MountConfig::new("/API/Citizen/", "other", true));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicatePrefix("/API/Citizen/".into())]
        );

        // Distinct under case-sensitive matching.
        config.routing.case_sensitive = true;
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_inactive_duplicate_is_allowed() {
        let mut config = GatewayConfig::default();
        config.mounts.push(MountConfig::new("/api/auth", "legacy-auth", false));
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_wildcard_origin_with_credentials() {
        let mut config = GatewayConfig::default();
        config.cors.allowed_origins = vec!["*".into()];
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::WildcardWithCredentials])
        );

        config.cors.allow_credentials = false;
        assert_eq!(validate_config(&config), Ok(()));
    }
}
