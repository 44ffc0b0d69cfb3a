//! "Who should release next": rank the packages that can ship right now.
//!
//! A candidate is unreleased and has no blockers left once the ignore set is
//! discounted. Candidates are ordered by [`Package::blocking_count`],
//! largest first. The sort is stable, so equal counts keep catalog order.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::{Catalog, Package};

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextRelease {
    pub name: String,
    pub blocking_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl From<&Package> for NextRelease {
    fn from(pkg: &Package) -> Self {
        Self {
            name: pkg.name.clone(),
            blocking_count: pkg.blocking_count(),
            url: pkg.source_url().map(str::to_string),
            version: pkg.version.clone(),
        }
    }
}

/// Whether `pkg` can release now, given blocker names to disregard.
#[must_use]
pub fn is_next_candidate(pkg: &Package, ignore: &BTreeSet<String>) -> bool {
    !pkg.is_released() && !pkg.is_blocked(ignore)
}

/// Rank the unblocked, unreleased packages of `catalog`.
#[must_use]
#[instrument(skip(catalog, ignore), fields(packages = catalog.len(), ignored = ignore.len()))]
pub fn who_is_next(catalog: &Catalog, ignore: &BTreeSet<String>) -> Vec<NextRelease> {
    let mut ranked: Vec<NextRelease> = catalog
        .iter()
        .filter(|pkg| is_next_candidate(pkg, ignore))
        .map(NextRelease::from)
        .collect();
    ranked.sort_by_key(|next| Reverse(next.blocking_count));
    debug!(candidates = ranked.len(), "ranked next releases");
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_ignore() -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn names(ranked: &[NextRelease]) -> Vec<&str> {
        ranked.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn skips_released_and_blocked() {
        let catalog: Catalog = [
            Package::new("done").released(true),
            Package::new("stuck").blocked_by(["free"]),
            Package::new("free"),
        ]
        .into_iter()
        .collect();
        assert_eq!(names(&who_is_next(&catalog, &no_ignore())), ["free"]);
    }

    #[test]
    fn sorts_by_blocking_count_descending() {
        let catalog: Catalog = [
            Package::new("one").blocking(["x"]),
            Package::new("three").blocking(["x", "y", "z"]),
            Package::new("none"),
            Package::new("two").recursive_blocking(["x", "y"]),
        ]
        .into_iter()
        .collect();
        let ranked = who_is_next(&catalog, &no_ignore());
        assert_eq!(names(&ranked), ["three", "two", "one", "none"]);
        assert_eq!(ranked[0].blocking_count, 3);
        assert_eq!(ranked[3].blocking_count, 0);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog: Catalog = [
            Package::new("m").blocking(["x"]),
            Package::new("b").blocking(["y"]),
            Package::new("z").blocking(["q"]),
        ]
        .into_iter()
        .collect();
        assert_eq!(names(&who_is_next(&catalog, &no_ignore())), ["m", "b", "z"]);
    }

    #[test]
    fn ignorable_blockers_still_count_as_next() {
        let catalog: Catalog = [
            Package::new("rviz").blocked_by(["catkin"]).blocking(["rqt"]),
            Package::new("rqt").blocked_by(["rviz"]),
        ]
        .into_iter()
        .collect();
        assert!(who_is_next(&catalog, &no_ignore()).is_empty());

        let ignore: BTreeSet<String> = ["catkin".to_string()].into();
        assert_eq!(names(&who_is_next(&catalog, &ignore)), ["rviz"]);
    }

    #[test]
    fn blank_url_is_reported_as_missing() {
        let catalog: Catalog = [Package::new("a").url("")].into_iter().collect();
        assert_eq!(who_is_next(&catalog, &no_ignore())[0].url, None);
    }
}
