//! Fuzz target for policy documents and version matching.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_table
//! ```

#![no_main]

use arbitrary::Arbitrary;
use depgate_domain::policy::PolicyTable;
use depgate_types::PackageRef;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct PolicyInput {
    /// Raw policy document text.
    document: String,
    /// Package probed against the parsed table.
    name: String,
    version: String,
}

fuzz_target!(|input: PolicyInput| {
    if input.document.len() > 64 * 1024 || input.version.len() > 256 {
        return;
    }

    let version = depgate_domain::version::normalize_version(&input.version);
    if let Ok(table) = PolicyTable::from_json_str(&input.document) {
        let _ = table.find_match(&PackageRef::new(input.name, version));
    }
});
