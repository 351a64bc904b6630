//! Fuzz target for manifest discovery over arbitrary change-sets.
//!
//! Goal: every located manifest is a `package.json` and appears at most once.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest_locator
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;

fuzz_target!(|paths: Vec<String>| {
    if paths.len() > 200 {
        return;
    }

    let located = depgate_repo::locate_manifests(&paths);
    let mut seen = BTreeSet::new();
    for location in &located {
        assert_eq!(location.path.file_name(), Some("package.json"));
        assert!(seen.insert(location.path.as_str().to_string()));
    }
});
