//! Stable DTOs and IDs used across the depgate workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report and the `violations` output
//! - stable string IDs and codes
//! - canonical repo-relative path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::RepoPath;
pub use receipt::{
    DepgateData, DepgateReportV1, ManifestStatus, ManifestSummary, PackageRef, ReportEnvelope,
    RunError, SCHEMA_REPORT_V1, ToolMeta, Verdict, ViolationReport,
};
