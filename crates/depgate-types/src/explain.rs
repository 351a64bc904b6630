//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after manifest examples.
    pub examples: ExamplePair,
}

/// Before and after manifest examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Manifest that would trigger the outcome.
    pub before: &'static str,
    /// Manifest that passes.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CHECK_POLICY_ALLOW | ids::CODE_PACKAGE_NOT_ALLOWED => Some(explain_allow()),
        ids::CHECK_POLICY_PROHIBIT | ids::CODE_PACKAGE_PROHIBITED => Some(explain_prohibit()),
        ids::CHECK_MANIFEST_PARSE | ids::CODE_MANIFEST_INVALID => Some(explain_manifest_invalid()),
        ids::CODE_MANIFEST_UNREADABLE => Some(explain_manifest_unreadable()),
        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_POLICY_ALLOW,
        ids::CHECK_POLICY_PROHIBIT,
        ids::CHECK_MANIFEST_PARSE,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_PACKAGE_NOT_ALLOWED,
        ids::CODE_PACKAGE_PROHIBITED,
        ids::CODE_MANIFEST_INVALID,
        ids::CODE_MANIFEST_UNREADABLE,
    ]
}

fn explain_allow() -> Explanation {
    Explanation {
        title: "Package Not On Allow List",
        description: "\
With `policy: allow`, every dependency declared in a changed package.json must match an
entry of the policy document: same package name, and either the same version or the
wildcard `*`.

Versions are compared after stripping a single leading `^` or `~`, so `^4.17.21` in the
manifest matches `4.17.21` in the policy. `1.0` and `1.0.0` denote the same release.
Other range expressions are compared literally.",
        remediation: "\
Either replace the dependency with an approved package/version, or get the package added
to the policy document (use `\"*\"` to approve every version).",
        examples: ExamplePair {
            before: r#"{
  "dependencies": { "lodash": "^4.17.20" }
}
// policy: { "lodash": "4.17.21" }"#,
            after: r#"{
  "dependencies": { "lodash": "^4.17.21" }
}
// policy: { "lodash": "4.17.21" }"#,
        },
    }
}

fn explain_prohibit() -> Explanation {
    Explanation {
        title: "Prohibited Package",
        description: "\
With `policy: prohibit`, a dependency declared in a changed package.json is a violation
when it matches an entry of the policy document: same package name, and either the same
version or the wildcard `*` (every version is prohibited).",
        remediation: "\
Remove the dependency or move to a version that the policy document does not list.",
        examples: ExamplePair {
            before: r#"{
  "dependencies": { "left-pad": "1.0.0" }
}
// policy: { "left-pad": "*" }"#,
            after: r#"{
  "dependencies": {}
}
// policy: { "left-pad": "*" }"#,
        },
    }
}

fn explain_manifest_invalid() -> Explanation {
    Explanation {
        title: "Invalid package.json",
        description: "\
A changed package.json could not be parsed: the file is not valid JSON, the top level is
not an object, `dependencies`/`devDependencies` is not an object, or a version is not a
string.

An invalid manifest always fails the run, even when `fail-if-violations` is off, because
its dependencies could not be checked.",
        remediation: "\
Fix the JSON syntax (trailing commas and comments are not allowed) and make sure every
dependency maps a package name to a version string.",
        examples: ExamplePair {
            before: r#"{
  "dependencies": { "axios": 1 },
}"#,
            after: r#"{
  "dependencies": { "axios": "1.0.0" }
}"#,
        },
    }
}

fn explain_manifest_unreadable() -> Explanation {
    let mut exp = explain_manifest_invalid();
    exp.title = "Unreadable package.json";
    exp.description = "\
A package.json reported as added or modified by the change-set could not be read from the
checkout (for example it was deleted by a later commit, or the checkout is missing).

An unreadable manifest always fails the run, because its dependencies could not be checked.";
    exp.remediation = "\
Make sure the workflow checks out the commit under evaluation before running depgate.";
    exp
}
