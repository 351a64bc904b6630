use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for depgate reports.
pub const SCHEMA_REPORT_V1: &str = "depgate.report.v1";

/// A dependency declaration or policy entry: package name plus normalized version.
///
/// Two refs are the same declaration when `name` matches exactly (case-sensitive).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct PackageRef {
    pub name: String,
    pub version: String,
}

impl PackageRef {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl std::fmt::Display for PackageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {}", self.name, self.version)
    }
}

/// Violating declarations found in one manifest.
///
/// The camelCase `filePath` key is the shape consumers of the `violations` output read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ViolationReport {
    #[serde(rename = "filePath")]
    pub file_path: String,
    pub packages: Vec<PackageRef>,
}

/// Overall outcome of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Every manifest conforms to the policy.
    Pass,
    /// Violations exist but the run is not configured to fail on them.
    Warn,
    /// Violations with `fail-if-violations`, a manifest failure, or a fatal error.
    Fail,
    /// No manifest was touched by the change-set.
    Skip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ManifestStatus {
    Conforming,
    Violations,
    Invalid,
}

/// Per-manifest evaluation summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ManifestSummary {
    pub path: String,
    pub status: ManifestStatus,
    pub dependencies_evaluated: u32,
    pub violations: u32,
    /// Why the manifest could not be evaluated (`manifest_invalid` or `manifest_unreadable`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RunError>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// A coded error: either the fatal error that aborted the run or a per-manifest failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

/// Depgate-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct DepgateData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_url: Option<String>,

    pub fail_if_violations: bool,
    pub include_dev_dependencies: bool,

    pub files_changed: u32,
    pub manifests_changed: u32,

    /// The loaded policy table; empty when the policy was never fetched.
    #[serde(default)]
    pub policy_entries: Vec<PackageRef>,

    #[serde(default)]
    pub manifests: Vec<ManifestSummary>,

    pub violations_total: u32,
}

/// Report envelope: run metadata, verdict, and the `violations` list around a tool payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = DepgateData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub violations: Vec<ViolationReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RunError>,
    pub data: TData,
}

pub type DepgateReportV1 = ReportEnvelope<DepgateData>;
