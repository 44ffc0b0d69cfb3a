//! Closure pass: fill in the optional blocking sets a loader left out.
//!
//! Some catalog sources only publish `blocked_by`. The ranker and the target
//! filter read `blocking` and `recursive_blocking`, so this pass derives them
//! from the [`BlockingGraph`]. Fields that are already present are kept as
//! they are; the pass never second-guesses the loader.

use tracing::{debug, instrument};

use crate::graph::{BlockingGraph, Catalog};

/// Return a copy of `catalog` where every absent `blocking` set is filled
/// with the packages that name it as a blocker (or that it declares itself).
#[must_use]
#[instrument(skip(catalog), fields(packages = catalog.len()))]
pub fn derive_blocking(catalog: &Catalog) -> Catalog {
    let graph = BlockingGraph::from_catalog(catalog);
    let mut filled = 0_usize;
    let derived = catalog
        .iter()
        .map(|pkg| {
            let mut pkg = pkg.clone();
            if pkg.blocking.is_none() {
                pkg.blocking = Some(graph.direct_blocking(&pkg.name));
                filled += 1;
            }
            pkg
        })
        .collect();
    debug!(filled, "derived direct blocking sets");
    derived
}

/// Return a copy of `catalog` where every absent `recursive_blocking` set is
/// filled with the transitive closure of the blocking edges.
///
/// Terminates on cyclic catalogs; a package on a cycle does not list itself.
#[must_use]
#[instrument(skip(catalog), fields(packages = catalog.len()))]
pub fn derive_recursive_blocking(catalog: &Catalog) -> Catalog {
    let graph = BlockingGraph::from_catalog(catalog);
    let mut filled = 0_usize;
    let derived = catalog
        .iter()
        .map(|pkg| {
            let mut pkg = pkg.clone();
            if pkg.recursive_blocking.is_none() {
                pkg.recursive_blocking = Some(graph.transitive_blocking(&pkg.name));
                filled += 1;
            }
            pkg
        })
        .collect();
    debug!(filled, "derived recursive blocking sets");
    derived
}

/// Both passes, direct sets first.
#[must_use]
pub fn derive_all(catalog: &Catalog) -> Catalog {
    derive_recursive_blocking(&derive_blocking(catalog))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::graph::Package;

    fn set(names: &[&str]) -> Option<BTreeSet<String>> {
        Some(names.iter().map(|n| (*n).to_string()).collect())
    }

    fn chain() -> Catalog {
        [
            Package::new("a"),
            Package::new("b").blocked_by(["a"]),
            Package::new("c").blocked_by(["b"]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn derives_direct_blocking_from_blocked_by() {
        let derived = derive_blocking(&chain());
        assert_eq!(derived.get("a").expect("a").blocking, set(&["b"]));
        assert_eq!(derived.get("c").expect("c").blocking, set(&[]));
    }

    #[test]
    fn derives_transitive_blocking() {
        let derived = derive_recursive_blocking(&chain());
        assert_eq!(derived.get("a").expect("a").recursive_blocking, set(&["b", "c"]));
        assert_eq!(derived.get("b").expect("b").recursive_blocking, set(&["c"]));
    }

    #[test]
    fn present_fields_are_not_overwritten() {
        let catalog: Catalog = [
            Package::new("a").blocking(["zz"]).recursive_blocking(["zz", "yy"]),
            Package::new("b").blocked_by(["a"]),
        ]
        .into_iter()
        .collect();
        let derived = derive_all(&catalog);
        let a = derived.get("a").expect("a");
        assert_eq!(a.blocking, set(&["zz"]));
        assert_eq!(a.recursive_blocking, set(&["yy", "zz"]));
    }

    #[test]
    fn source_catalog_is_unchanged() {
        let catalog = chain();
        let _ = derive_all(&catalog);
        assert!(catalog.get("a").expect("a").blocking.is_none());
    }

    #[test]
    fn cycle_members_do_not_list_themselves() {
        let catalog: Catalog = [
            Package::new("x").blocked_by(["z"]),
            Package::new("y").blocked_by(["x"]),
            Package::new("z").blocked_by(["y"]),
        ]
        .into_iter()
        .collect();
        let derived = derive_recursive_blocking(&catalog);
        for pkg in &derived {
            let reach = pkg.recursive_blocking.as_ref().expect("filled");
            assert!(!reach.contains(&pkg.name));
            assert_eq!(reach.len(), 2);
        }
    }
}
