//! Stable identifiers for checks and outcome codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_POLICY_ALLOW: &str = "policy.allow";
pub const CHECK_POLICY_PROHIBIT: &str = "policy.prohibit";
pub const CHECK_MANIFEST_PARSE: &str = "manifest.parse";

// Codes: policy.allow
pub const CODE_PACKAGE_NOT_ALLOWED: &str = "package_not_allowed";

// Codes: policy.prohibit
pub const CODE_PACKAGE_PROHIBITED: &str = "package_prohibited";

// Codes: manifest.parse
pub const CODE_MANIFEST_INVALID: &str = "manifest_invalid";
pub const CODE_MANIFEST_UNREADABLE: &str = "manifest_unreadable";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
pub const CODE_CONFIG_ERROR: &str = "config_error";
pub const CODE_POLICY_FETCH_ERROR: &str = "policy_fetch_error";
pub const CODE_POLICY_PARSE_ERROR: &str = "policy_parse_error";
pub const CODE_CHANGE_SET_ERROR: &str = "change_set_error";

/// Name of the step output carrying the violation list.
pub const OUTPUT_VIOLATIONS: &str = "violations";
