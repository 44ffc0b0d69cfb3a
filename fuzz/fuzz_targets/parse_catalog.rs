#![no_main]

use libfuzzer_sys::fuzz_target;
use relgraph_core::Catalog;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(catalog) = Catalog::from_yaml_str(text) {
            let _ = catalog.to_yaml_string();
        }
    }
});
