use crate::{RenderableManifestStatus, RenderableReport, RenderableVerdictStatus};
use depgate_types::PackageRef;

const RULE: &str = "-------------------------------------------";
const SHORT_RULE: &str = "---------------------------";

pub const NO_UPDATES: &str = "No package updates detected.";
pub const VIOLATIONS_BANNER: &str = "!!! PACKAGE POLICY VIOLATIONS DETECTED !!!";
pub const ALL_CLEAR: &str =
    "All package manifest files reference packages that conform to the policy provided.";

/// The policy list as printed before any manifest is evaluated.
pub fn render_policy_table(entries: &[PackageRef]) -> String {
    let mut out = format!("\nPACKAGE POLICY LIST\n{SHORT_RULE}\n");
    for e in entries {
        out.push_str(&format!("{} - {}\n", e.name, e.version));
    }
    out
}

/// Human-readable run log: policy table, per-manifest evaluation, violation block.
pub fn render_console(report: &RenderableReport) -> String {
    if report.data.error.is_some() {
        return String::new();
    }
    if report.verdict == RenderableVerdictStatus::Skip && report.manifests.is_empty() {
        return format!("{NO_UPDATES}\n");
    }

    let mut out = render_policy_table(&report.policy_entries);

    for m in &report.manifests {
        out.push_str(&format!("\nEvaluating '{}'\n{RULE}\n", m.path));
        match m.status {
            RenderableManifestStatus::Conforming => out.push_str("\nNo violations detected\n"),
            RenderableManifestStatus::Violations => {}
            RenderableManifestStatus::Invalid => out.push_str(&format!(
                "\nUnable to evaluate the package.json manifest file: {}\n",
                m.error.as_deref().unwrap_or("unknown error")
            )),
        }
    }

    let violating: Vec<_> = report
        .manifests
        .iter()
        .filter(|m| !m.violations.is_empty())
        .collect();

    if !violating.is_empty() {
        out.push_str(&format!("\n{VIOLATIONS_BANNER}\n{RULE}\n"));
        for m in violating {
            out.push_str(&format!("Package Manifest: {}\n", m.path));
            for p in &m.violations {
                out.push_str(&format!(" - {p}\n"));
            }
            out.push('\n');
        }
    } else if report
        .manifests
        .iter()
        .all(|m| m.status != RenderableManifestStatus::Invalid)
    {
        out.push_str(&format!("\n{ALL_CLEAR}\n"));
    }

    out
}
