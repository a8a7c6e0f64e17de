//! Route registry: the ordered mount table.
//!
//! # Responsibilities
//! - Record every mount in insertion order, active or not
//! - Emit one log event per mount, as part of the same call
//! - Resolve a path to the group owning the longest matching prefix
//!
//! # Design Decisions
//! - Built once at startup, then shared immutably (no locks on the hot path)
//! - Longest segment-aligned prefix wins; equal lengths go to the entry
//!   registered first
//! - Inactive entries stay in the table and are skipped by `resolve`
//! - O(n) scan over mounts (tables are small)

use thiserror::Error;

use crate::config::MountConfig;
use crate::routing::group::{HandlerCatalog, HandlerGroup};
use crate::routing::matcher::PathPrefixMatcher;

/// Errors raised while building the registry from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("mount {prefix:?} references unknown handler group {group:?}")]
    UnknownGroup { prefix: String, group: String },
}

/// One row of the mount table.
#[derive(Debug, Clone)]
pub struct MountEntry {
    prefix: String,
    matcher: PathPrefixMatcher,
    group: HandlerGroup,
    active: bool,
}

impl MountEntry {
    /// The prefix as it was mounted.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn group(&self) -> &HandlerGroup {
        &self.group
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn matcher(&self) -> &PathPrefixMatcher {
        &self.matcher
    }
}

/// Ordered prefix → handler group table.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    entries: Vec<MountEntry>,
    case_sensitive: bool,
}

impl RouteRegistry {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            entries: Vec::new(),
            case_sensitive,
        }
    }

    /// Build the table from configuration, in configuration order.
    ///
    /// Active mounts must name a registered group. Inactive mounts whose
    /// group is not registered are recorded with an unavailable stand-in.
    pub fn from_config(
        mounts: &[MountConfig],
        catalog: &HandlerCatalog,
        case_sensitive: bool,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new(case_sensitive);

        for mount in mounts {
            match (catalog.get(&mount.group), mount.active) {
                (Some(group), true) => {
                    registry.mount(&mount.prefix, group.clone());
                }
                (Some(group), false) => {
                    registry.mount_disabled(&mount.prefix, group.clone());
                }
                (None, false) => {
                    registry.mount_disabled(&mount.prefix, HandlerGroup::unavailable(mount.group.as_str()));
                }
                (None, true) => {
                    return Err(RegistryError::UnknownGroup {
                        prefix: mount.prefix.clone(),
                        group: mount.group.clone(),
                    });
                }
            }
        }

        Ok(registry)
    }

    /// Mount `group` under `prefix` and log the registration.
    pub fn mount(&mut self, prefix: &str, group: HandlerGroup) -> &mut Self {
        self.push(prefix, group, true)
    }

    /// Record `prefix` in the table without routing any traffic to it.
    pub fn mount_disabled(&mut self, prefix: &str, group: HandlerGroup) -> &mut Self {
        self.push(prefix, group, false)
    }

    fn push(&mut self, prefix: &str, group: HandlerGroup, active: bool) -> &mut Self {
        tracing::info!(prefix = %prefix, group = %group.name(), active, "Registering route");
        self.entries.push(MountEntry {
            prefix: prefix.to_string(),
            matcher: PathPrefixMatcher::new(prefix, self.case_sensitive),
            group,
            active,
        });
        self
    }

    /// Find the active entry with the longest prefix covering `path`.
    pub fn resolve(&self, path: &str) -> Option<&MountEntry> {
        let mut best: Option<&MountEntry> = None;
        for entry in self.entries.iter().filter(|e| e.active) {
            if !entry.matcher.matches(path) {
                continue;
            }
            // Strictly longer only, so the earliest registration keeps ties.
            if best.map_or(true, |b| entry.matcher.len() > b.matcher.len()) {
                best = Some(entry);
            }
        }
        best
    }

    /// All entries in registration order, including inactive ones.
    pub fn entries(&self) -> &[MountEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
