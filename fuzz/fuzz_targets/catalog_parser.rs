//! Fuzz target for catalog parsing and rule compilation.
//!
//! Arbitrary TOML must either fail to parse, fail to compile with a
//! configuration error, or compile into a catalog addressable by every id.

#![no_main]

use libfuzzer_sys::fuzz_target;

use kindword_domain::RuleCatalog;
use kindword_types::CatalogFile;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(catalog) = toml::from_str::<CatalogFile>(text) else {
        return;
    };

    if let Ok(compiled) = RuleCatalog::compile(&catalog.rule) {
        assert_eq!(compiled.len(), catalog.rule.len());
        for rule in &catalog.rule {
            assert!(compiled.get(&rule.id).is_ok());
        }
    }
});
