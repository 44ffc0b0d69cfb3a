#![no_main]

use std::collections::BTreeSet;

use libfuzzer_sys::fuzz_target;
use relgraph_core::export::{dot_graph, manifest};
use relgraph_core::filter::{filter_by_depth, filter_by_targets};
use relgraph_core::rank::who_is_next;
use relgraph_core::{Catalog, closure};

fuzz_target!(|data: &[u8]| {
    let Some((&depth, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let Ok(catalog) = Catalog::from_yaml_str(text) else {
        return;
    };

    let derived = closure::derive_all(&catalog);
    let targets: BTreeSet<String> = derived.names().take(2).map(str::to_string).collect();
    let filtered = filter_by_targets(&filter_by_depth(&derived, usize::from(depth)), &targets);
    let _ = dot_graph(&filtered);
    let _ = manifest(&who_is_next(&filtered, &BTreeSet::new()));
});
