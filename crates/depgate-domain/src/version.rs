//! Version expression normalization and comparison.
//!
//! Only a single leading range indicator is understood. Anything richer (`>=1.0.0 <2.0.0`,
//! `1.x`, `latest`) is carried through untouched and compared literally.

use semver::{BuildMetadata, Version};

/// Policy version that matches every version of a package.
pub const WILDCARD: &str = "*";

/// Strip a single leading `^` or `~` from a version expression.
///
/// Total: any string, including the empty string, is accepted.
pub fn normalize_version(raw: &str) -> String {
    raw.strip_prefix(|c: char| c == '^' || c == '~')
        .unwrap_or(raw)
        .to_string()
}

/// Whether two normalized version strings denote the same release.
///
/// Both sides are read leniently as semver (optional `v` prefix, missing minor/patch
/// treated as `0`, build metadata ignored). If either side is not a version, the strings
/// must be identical.
pub fn versions_equal(a: &str, b: &str) -> bool {
    match (parse_release(a), parse_release(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn parse_release(raw: &str) -> Option<Version> {
    let s = raw.trim();
    let s = s.strip_prefix(|c: char| c == 'v' || c == 'V').unwrap_or(s);

    let core_end = s.find(|c: char| c == '-' || c == '+').unwrap_or(s.len());
    let (core, suffix) = s.split_at(core_end);

    let parts = core.split('.').count();
    if core.is_empty() || parts > 3 {
        return None;
    }

    let mut padded = core.to_string();
    for _ in parts..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);

    let mut version = Version::parse(&padded).ok()?;
    version.build = BuildMetadata::EMPTY;
    Some(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_leading_indicator() {
        assert_eq!(normalize_version("^4.17.21"), "4.17.21");
        assert_eq!(normalize_version("~1.2.0"), "1.2.0");
        assert_eq!(normalize_version("1.2.0"), "1.2.0");
        assert_eq!(normalize_version(""), "");
        assert_eq!(normalize_version("^"), "");
    }

    #[test]
    fn only_the_first_character_is_inspected() {
        assert_eq!(normalize_version(">=1.0.0 <2.0.0"), ">=1.0.0 <2.0.0");
        assert_eq!(normalize_version("1.0.0^"), "1.0.0^");
        assert_eq!(normalize_version("^~1.0.0"), "~1.0.0");
    }

    #[test]
    fn wildcard_is_not_touched() {
        assert_eq!(normalize_version(WILDCARD), WILDCARD);
    }

    #[test]
    fn equal_releases_ignore_formatting() {
        assert!(versions_equal("1.0", "1.0.0"));
        assert!(versions_equal("1", "1.0.0"));
        assert!(versions_equal("v1.2.3", "1.2.3"));
        assert!(versions_equal("1.2.3+build.5", "1.2.3"));
        assert!(versions_equal("1.0.0-beta.1", "1.0-beta.1"));
    }

    #[test]
    fn different_releases_are_not_equal() {
        assert!(!versions_equal("4.17.20", "4.17.21"));
        assert!(!versions_equal("1.0.0-beta.1", "1.0.0"));
        assert!(!versions_equal("2", "2.0.1"));
    }

    #[test]
    fn non_versions_fall_back_to_exact_comparison() {
        assert!(versions_equal(">=1.0.0 <2.0.0", ">=1.0.0 <2.0.0"));
        assert!(!versions_equal(">=1.0.0 <2.0.0", "1.0.0"));
        assert!(versions_equal("latest", "latest"));
        assert!(!versions_equal("1.x", "1.0.0"));
        assert!(!versions_equal("1.2.3.4", "1.2.3"));
        assert!(!versions_equal("", "0.0.0"));
    }
}
