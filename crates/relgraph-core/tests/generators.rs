//! Proptest strategies for arbitrary catalogs.
//!
//! Names come from a small pool so generated catalogs are dense with
//! relationships (and cycles). `ext` is never defined, so it always acts as
//! an unresolved reference.

use std::collections::BTreeSet;

use proptest::collection::{btree_set, vec};
use proptest::option;
use proptest::prelude::*;

use relgraph_core::{Catalog, Package};

pub const POOL: [&str; 7] = ["p0", "p1", "p2", "p3", "p4", "p5", "ext"];

pub fn arb_name() -> impl Strategy<Value = String> {
    proptest::sample::select(POOL.to_vec()).prop_map(str::to_string)
}

pub fn arb_name_set() -> impl Strategy<Value = BTreeSet<String>> {
    btree_set(arb_name(), 0..4)
}

pub fn arb_package(name: String) -> impl Strategy<Value = Package> {
    (
        any::<bool>(),
        arb_name_set(),
        option::of(arb_name_set()),
        option::of(arb_name_set()),
        option::of(prop_oneof![Just(String::new()), "[a-z]{1,8}".prop_map(|s| format!("https://example.com/{s}.git"))]),
    )
        .prop_map(move |(released, blocked_by, blocking, recursive, url)| {
            let mut blocked_by = blocked_by;
            blocked_by.remove(&name);
            Package {
                name: name.clone(),
                released,
                blocked_by,
                blocking,
                recursive_blocking: recursive,
                url,
                version: None,
            }
        })
}

/// A catalog over a random subset of the defined pool names, in random order.
pub fn arb_catalog() -> impl Strategy<Value = Catalog> {
    Just(POOL[..6].iter().map(|n| (*n).to_string()).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_flat_map(|names| (Just(names), 0..=6_usize))
        .prop_flat_map(|(names, keep)| {
            let packages: Vec<_> = names.into_iter().take(keep).map(arb_package).collect();
            packages
        })
        .prop_map(|packages: Vec<Package>| packages.into_iter().collect::<Catalog>())
}

pub fn arb_targets() -> impl Strategy<Value = BTreeSet<String>> {
    btree_set(arb_name(), 0..3)
}

#[allow(dead_code)]
pub fn arb_ignore() -> impl Strategy<Value = BTreeSet<String>> {
    vec(arb_name(), 0..2).prop_map(|names| names.into_iter().collect())
}
