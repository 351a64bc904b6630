use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `depgate.toml` schema v1.
///
/// Every key is optional; action inputs and CLI flags take precedence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DepgateConfigV1 {
    /// Optional schema string for tooling (`depgate.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `allow` or `prohibit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,

    /// Where the policy document is fetched from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_if_violations: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_dev_dependencies: Option<bool>,
}
