//! Route matching logic.
//!
//! # Responsibilities
//! - Match a request path against a mount prefix
//! - Only match at `/` segment boundaries
//!
//! # Design Decisions
//! - `/api/issues` matches `/api/issues` and `/api/issues/5`, never `/api/issuesX`
//! - A trailing `/` on a configured prefix is ignored
//! - ASCII case-insensitive unless configured otherwise
//! - No regex to guarantee O(n) matching

/// Canonical form of a mount prefix: no trailing slash (except the root),
/// lowercased when matching is case-insensitive.
pub fn normalize_prefix(prefix: &str, case_sensitive: bool) -> String {
    let trimmed = prefix.trim_end_matches('/');
    let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
    if case_sensitive {
        trimmed.to_string()
    } else {
        trimmed.to_ascii_lowercase()
    }
}

/// Matches the request path against a segment-aligned prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
    case_sensitive: bool,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: &str, case_sensitive: bool) -> Self {
        Self {
            prefix: normalize_prefix(prefix, case_sensitive),
            case_sensitive,
        }
    }

    /// The normalized prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Length of the normalized prefix, used to rank competing matches.
    pub fn len(&self) -> usize {
        if self.prefix == "/" {
            0
        } else {
            self.prefix.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `path` starts with the prefix at a segment boundary.
    pub fn matches(&self, path: &str) -> bool {
        if self.prefix == "/" {
            return true;
        }

        let Some(head) = path.get(..self.prefix.len()) else {
            return false;
        };
        let head_matches = if self.case_sensitive {
            head == self.prefix
        } else {
            head.eq_ignore_ascii_case(&self.prefix)
        };

        head_matches && matches!(path.as_bytes().get(self.prefix.len()), None | Some(b'/'))
    }

    /// The remainder of `path` after the prefix, always starting with `/`.
    ///
    /// Callers must check [`matches`](Self::matches) first.
    pub fn strip<'a>(&self, path: &'a str) -> &'a str {
        if self.prefix == "/" {
            return path;
        }
        match path.get(self.prefix.len()..) {
            Some(rest) if !rest.is_empty() => rest,
            _ => "/",
        }
    }
}
