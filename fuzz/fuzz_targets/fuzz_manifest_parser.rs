//! Fuzz target for package.json dependency extraction.
//!
//! Goal: extraction should **never panic**. Malformed manifests yield errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = depgate_repo::fuzz::parse_manifest(text, false);
    let _ = depgate_repo::fuzz::parse_manifest(text, true);
});
