//! Cache tags and keys for the request cache.
//!
//! A tag associates cached query results with a data domain; mutations
//! declare which tags they invalidate. Keys identify a query by endpoint
//! path plus its serialized arguments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data-domain discriminator for cached query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheTag {
    DoctorChemist,
    Employee,
    Leave,
    Dashboard,
    Hq,
    AdminDashboard,
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheTag::DoctorChemist => "DoctorChemist",
            CacheTag::Employee => "Employee",
            CacheTag::Leave => "Leave",
            CacheTag::Dashboard => "Dashboard",
            CacheTag::Hq => "HQ",
            CacheTag::AdminDashboard => "AdminDashboard",
        };
        f.write_str(name)
    }
}

/// Identity of a cached query: endpoint path plus canonical JSON of the
/// query arguments. Two calls with equal paths and equal arguments share
/// one cache entry and coalesce in-flight.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    path: String,
    args: String,
}

impl CacheKey {
    /// Key for a query with no arguments.
    pub fn bare(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            args: String::new(),
        }
    }

    /// Key for a query with serializable arguments. Serialization of the
    /// argument struct is infallible for the types used here; a failure
    /// would be a programming error, so it degrades to the bare key.
    pub fn with_args<A: Serialize>(path: impl Into<String>, args: &A) -> Self {
        Self {
            path: path.into(),
            args: serde_json::to_string(args).unwrap_or_default(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Args {
        page: u32,
        search: String,
    }

    #[test]
    fn equal_args_produce_equal_keys() {
        let a = CacheKey::with_args(
            "/employees",
            &Args {
                page: 1,
                search: "rao".into(),
            },
        );
        let b = CacheKey::with_args(
            "/employees",
            &Args {
                page: 1,
                search: "rao".into(),
            },
        );
        assert_eq!(a, b);
    }

    #[test]
    fn different_args_produce_different_keys() {
        let a = CacheKey::with_args("/employees", &Args { page: 1, search: String::new() });
        let b = CacheKey::with_args("/employees", &Args { page: 2, search: String::new() });
        assert_ne!(a, b);
        assert_ne!(a, CacheKey::bare("/employees"));
    }
}
