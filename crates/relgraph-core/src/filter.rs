//! Closure filters: narrow a catalog to the part worth looking at.
//!
//! Both filters return a new [`Catalog`] holding a subset of the input in the
//! input's order. They compose in either order.
//!
//! # Depth filter
//!
//! Layer 0 is every package with nothing blocking it. Layer `k` is every
//! package not yet taken whose blockers were all taken in layers `0..k`. The
//! filter stops after `depth + 1` layers or when a layer comes up empty.
//! Packages on a cycle never have all their blockers taken, so they never
//! qualify, and the loop still ends because every non-empty layer grows the
//! selection.
//!
//! # Target filter
//!
//! Keeps the targets themselves and every package whose precomputed
//! `recursive_blocking` reaches a target. It does not compute the closure
//! itself; run [`crate::closure::derive_recursive_blocking`] first when the
//! loader did not supply it.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, instrument};

use crate::graph::Catalog;

/// Keep the packages within `depth` hops of the unblocked roots.
#[must_use]
#[instrument(skip(catalog), fields(packages = catalog.len()))]
pub fn filter_by_depth(catalog: &Catalog, depth: usize) -> Catalog {
    let mut selected: HashSet<&str> = HashSet::with_capacity(catalog.len());
    let mut layers = 0_usize;

    while layers <= depth {
        let layer: Vec<&str> = catalog
            .iter()
            .filter(|pkg| !selected.contains(pkg.name.as_str()))
            .filter(|pkg| {
                pkg.blocked_by
                    .iter()
                    .all(|blocker| selected.contains(blocker.as_str()))
            })
            .map(|pkg| pkg.name.as_str())
            .collect();

        if layer.is_empty() {
            break;
        }
        debug!(layer = layers, size = layer.len(), "depth layer collected");
        selected.extend(layer);
        layers += 1;
    }

    catalog.subset(|pkg| selected.contains(pkg.name.as_str()))
}

/// Keep the targets and every package that transitively blocks one.
#[must_use]
#[instrument(skip(catalog, targets), fields(packages = catalog.len(), target_count = targets.len()))]
pub fn filter_by_targets(catalog: &Catalog, targets: &BTreeSet<String>) -> Catalog {
    let without_closure = catalog
        .iter()
        .filter(|pkg| pkg.recursive_blocking.is_none())
        .count();
    if without_closure > 0 && without_closure < catalog.len() {
        debug!(
            without_closure,
            "catalog mixes packages with and without recursive_blocking; those without can only match by name"
        );
    } else if without_closure > 0 {
        debug!("no package carries recursive_blocking; only targets themselves can match");
    }

    catalog.subset(|pkg| {
        targets.contains(&pkg.name)
            || pkg
                .recursive_blocking
                .as_ref()
                .is_some_and(|reach| !reach.is_disjoint(targets))
    })
}

/// Drop packages that have already released.
#[must_use]
pub fn filter_unreleased(catalog: &Catalog) -> Catalog {
    catalog.subset(|pkg| !pkg.is_released())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
