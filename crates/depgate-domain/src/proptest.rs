//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Version normalization
//! - Wildcard policy entries
//! - Allow/prohibit complementarity
//! - Aggregation ordering

use crate::engine::evaluate;
use crate::model::ManifestOutcome;
use crate::policy::{PolicyMode, PolicyTable};
use crate::report::aggregate;
use crate::version::{WILDCARD, normalize_version};
use depgate_types::PackageRef;
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for npm-style package names (optionally scoped).
fn arb_package_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z][a-z0-9-]{0,15}").unwrap(),
        prop::string::string_regex("@[a-z]{1,8}/[a-z][a-z0-9-]{0,10}").unwrap(),
    ]
}

/// Strategy for raw version expressions as they appear in manifests.
fn arb_raw_version() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..20, 0u32..20, 0u32..20).prop_map(|(a, b, c)| format!("{a}.{b}.{c}")),
        (0u32..20, 0u32..20, 0u32..20).prop_map(|(a, b, c)| format!("^{a}.{b}.{c}")),
        (0u32..20, 0u32..20, 0u32..20).prop_map(|(a, b, c)| format!("~{a}.{b}.{c}")),
        (0u32..20, 0u32..20).prop_map(|(a, b)| format!("{a}.{b}")),
        (0u32..20).prop_map(|a| format!(">={a}.0.0 <{}.0.0", a + 1)),
        Just("latest".to_string()),
    ]
}

/// Normalized, non-wildcard declarations.
fn arb_refs() -> impl Strategy<Value = Vec<PackageRef>> {
    prop::collection::vec(
        (arb_package_name(), arb_raw_version())
            .prop_map(|(name, raw)| PackageRef::new(name, normalize_version(&raw))),
        0..12,
    )
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in ".*") {
        let once = normalize_version(&raw);
        // A second strip only happens for doubled indicators like "^^1.0.0".
        let doubled = raw.starts_with(['^', '~']) && once.starts_with(['^', '~']);
        if !doubled {
            prop_assert_eq!(normalize_version(&once), once);
        }
    }

    #[test]
    fn normalized_manifest_versions_have_no_indicator(raw in arb_raw_version()) {
        let v = normalize_version(&raw);
        prop_assert!(!v.starts_with('^') && !v.starts_with('~'));
    }

    #[test]
    fn wildcard_matches_every_version_in_both_modes(
        name in arb_package_name(),
        raw in arb_raw_version(),
    ) {
        let policy = PolicyTable::new(vec![PackageRef::new(name.clone(), WILDCARD)]);
        let referenced = vec![PackageRef::new(name, normalize_version(&raw))];

        prop_assert!(evaluate(&referenced, &policy, PolicyMode::Allow).is_empty());
        prop_assert_eq!(evaluate(&referenced, &policy, PolicyMode::Prohibit), referenced);
    }

    #[test]
    fn allow_and_prohibit_are_complementary(
        referenced in arb_refs(),
        policy in arb_refs(),
    ) {
        let policy = PolicyTable::new(policy);

        let allowed = evaluate(&referenced, &policy, PolicyMode::Allow);
        let prohibited = evaluate(&referenced, &policy, PolicyMode::Prohibit);
        prop_assert_eq!(allowed.len() + prohibited.len(), referenced.len());

        for r in &referenced {
            let single = std::slice::from_ref(r);
            let allow_flags = !evaluate(single, &policy, PolicyMode::Allow).is_empty();
            let prohibit_flags = !evaluate(single, &policy, PolicyMode::Prohibit).is_empty();
            prop_assert_ne!(allow_flags, prohibit_flags);
        }
    }

    #[test]
    fn violations_are_an_ordered_subsequence(
        referenced in arb_refs(),
        policy in arb_refs(),
        prohibit in any::<bool>(),
    ) {
        let mode = if prohibit { PolicyMode::Prohibit } else { PolicyMode::Allow };
        let violations = evaluate(&referenced, &PolicyTable::new(policy), mode);

        let mut rest = referenced.iter();
        for v in &violations {
            prop_assert!(rest.any(|r| r == v), "violation {v} out of declaration order");
        }
    }

    #[test]
    fn aggregate_keeps_manifest_order(
        counts in prop::collection::vec(0usize..3, 0..8),
        fail_if_violations in any::<bool>(),
    ) {
        let outcomes: Vec<ManifestOutcome> = counts
            .iter()
            .enumerate()
            .map(|(i, n)| ManifestOutcome::Evaluated {
                file_path: format!("pkg{i}/package.json"),
                dependencies_evaluated: *n,
                violations: (0..*n).map(|j| PackageRef::new(format!("dep{j}"), "1.0.0")).collect(),
            })
            .collect();

        let result = aggregate(&outcomes, fail_if_violations);
        let expected: Vec<String> = counts
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 0)
            .map(|(i, _)| format!("pkg{i}/package.json"))
            .collect();
        let actual: Vec<String> = result.violations.iter().map(|v| v.file_path.clone()).collect();

        prop_assert_eq!(actual, expected);
        prop_assert_eq!(result.should_fail, fail_if_violations && !result.violations.is_empty());
    }
}
