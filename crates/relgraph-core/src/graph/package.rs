//! Package records and the normalized [`Package`] node.
//!
//! [`PackageRecord`] is the wire shape read from (and written to) a catalog
//! document. Every field is optional there because upstream catalogs are not
//! guaranteed complete. [`Package`] is the normalized node the rest of the
//! engine works with: `blocked_by` and `released` always have a value, while
//! `blocking` and `recursive_blocking` stay explicitly optional so callers can
//! tell "absent" apart from "present but empty".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PackageRecord
// ---------------------------------------------------------------------------

/// One catalog entry as it appears in a YAML document.
///
/// Field aliases match the names emitted by the ROS build farm status page
/// (`repos_blocked_by`, `repos_blocking`, `recursive_repos_blocking`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<bool>,

    #[serde(
        default,
        alias = "repos_blocked_by",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocked_by: Option<BTreeSet<String>>,

    #[serde(
        default,
        alias = "repos_blocking",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocking: Option<BTreeSet<String>>,

    #[serde(
        default,
        alias = "recursive_repos_blocking",
        skip_serializing_if = "Option::is_none"
    )]
    pub recursive_blocking: Option<BTreeSet<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl From<&Package> for PackageRecord {
    fn from(pkg: &Package) -> Self {
        Self {
            released: Some(pkg.released),
            blocked_by: Some(pkg.blocked_by.clone()),
            blocking: pkg.blocking.clone(),
            recursive_blocking: pkg.recursive_blocking.clone(),
            url: pkg.url.clone(),
            version: pkg.version.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Package
// ---------------------------------------------------------------------------

/// A package node in the release-blocking graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Unique package name; also the catalog key.
    pub name: String,
    /// True once the package has shipped its pending changes.
    pub released: bool,
    /// Packages that must release before this one. May name packages that are
    /// not in the catalog; those stay unresolved rather than being dropped.
    pub blocked_by: BTreeSet<String>,
    /// Packages waiting on this one, when the loader supplied them.
    pub blocking: Option<BTreeSet<String>>,
    /// Transitive closure of `blocking`, when precomputed.
    pub recursive_blocking: Option<BTreeSet<String>>,
    /// Source-control URL. `None` or empty when unknown.
    pub url: Option<String>,
    /// Branch, tag, or commit to check out.
    pub version: Option<String>,
}

impl Package {
    /// Create an unreleased, unblocked package with no optional fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            released: false,
            blocked_by: BTreeSet::new(),
            blocking: None,
            recursive_blocking: None,
            url: None,
            version: None,
        }
    }

    /// Normalize a [`PackageRecord`], defaulting every missing field.
    #[must_use]
    pub fn from_record(name: impl Into<String>, record: PackageRecord) -> Self {
        Self {
            name: name.into(),
            released: record.released.unwrap_or(false),
            blocked_by: record.blocked_by.unwrap_or_default(),
            blocking: record.blocking,
            recursive_blocking: record.recursive_blocking,
            url: record.url,
            version: record.version,
        }
    }

    #[must_use]
    pub fn released(mut self, released: bool) -> Self {
        self.released = released;
        self
    }

    #[must_use]
    pub fn blocked_by<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_by = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn blocking<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocking = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn recursive_blocking<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recursive_blocking = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Whether the package has already shipped.
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.released
    }

    /// Whether any blocker remains once names in `ignore` are discounted.
    #[must_use]
    pub fn is_blocked(&self, ignore: &BTreeSet<String>) -> bool {
        self.blocked_by.iter().any(|name| !ignore.contains(name))
    }

    /// The source URL, treating an empty string as absent.
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// How many packages releasing this one would unblock.
    ///
    /// Prefers the transitive set, then the direct set, then zero.
    #[must_use]
    pub fn blocking_count(&self) -> usize {
        self.recursive_blocking
            .as_ref()
            .or(self.blocking.as_ref())
            .map_or(0, BTreeSet::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignore(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn empty_record_defaults_to_unreleased_and_unblocked() {
        let pkg = Package::from_record("catkin", PackageRecord::default());
        assert_eq!(pkg.name, "catkin");
        assert!(!pkg.is_released());
        assert!(!pkg.is_blocked(&BTreeSet::new()));
        assert!(pkg.blocking.is_none());
        assert!(pkg.recursive_blocking.is_none());
    }

    #[test]
    fn ignored_blockers_do_not_count() {
        let pkg = Package::new("rviz").blocked_by(["catkin", "ogre"]);
        assert!(pkg.is_blocked(&BTreeSet::new()));
        assert!(pkg.is_blocked(&ignore(&["catkin"])));
        assert!(!pkg.is_blocked(&ignore(&["catkin", "ogre"])));
    }

    #[test]
    fn blocking_count_prefers_recursive_set() {
        let pkg = Package::new("a")
            .blocking(["b"])
            .recursive_blocking(["b", "c", "d"]);
        assert_eq!(pkg.blocking_count(), 3);
    }

    #[test]
    fn blocking_count_falls_back_to_direct_then_zero() {
        assert_eq!(Package::new("a").blocking(["b", "c"]).blocking_count(), 2);
        assert_eq!(Package::new("a").blocking_count(), 0);
    }

    #[test]
    fn present_but_empty_recursive_set_wins_over_direct() {
        let pkg = Package::new("a")
            .blocking(["b"])
            .recursive_blocking(Vec::<String>::new());
        assert_eq!(pkg.blocking_count(), 0);
    }

    #[test]
    fn blank_url_is_treated_as_missing() {
        assert_eq!(Package::new("a").url("  ").source_url(), None);
        assert_eq!(
            Package::new("a").url("https://example.com/a.git").source_url(),
            Some("https://example.com/a.git")
        );
    }

    #[test]
    fn record_round_trips_through_package() {
        let pkg = Package::new("a").blocked_by(["b"]).url("u").version("main");
        let record = PackageRecord::from(&pkg);
        assert_eq!(Package::from_record("a", record), pkg);
    }
}
