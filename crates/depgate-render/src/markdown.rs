use crate::{RenderableManifestStatus, RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Depgate report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
        RenderableVerdictStatus::Skip => "SKIP",
    };
    out.push_str(&format!("- Verdict: **{verdict}**\n"));
    if let Some(policy) = &report.data.policy {
        out.push_str(&format!(
            "- Policy: `{policy}` ({} entries)\n",
            report.policy_entries.len()
        ));
    }
    out.push_str(&format!(
        "- Files changed: {} / Manifests changed: {} / Violations: {}\n\n",
        report.data.files_changed, report.data.manifests_changed, report.data.violations_total
    ));

    if let Some(err) = &report.data.error {
        out.push_str(&format!("> Error: {err}\n"));
        return out;
    }

    if report.manifests.is_empty() {
        out.push_str("No package updates detected.\n");
        return out;
    }

    out.push_str("## Manifests\n\n");
    out.push_str("| Manifest | Status | Dependencies | Violations |\n");
    out.push_str("|---|---|---|---|\n");
    for m in &report.manifests {
        let status = match m.status {
            RenderableManifestStatus::Conforming => "conforming",
            RenderableManifestStatus::Violations => "violations",
            RenderableManifestStatus::Invalid => "invalid",
        };
        out.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            m.path,
            status,
            m.dependencies_evaluated,
            m.violations.len()
        ));
    }
    out.push('\n');

    let violating: Vec<_> = report
        .manifests
        .iter()
        .filter(|m| !m.violations.is_empty())
        .collect();
    let invalid: Vec<_> = report
        .manifests
        .iter()
        .filter(|m| m.status == RenderableManifestStatus::Invalid)
        .collect();

    if violating.is_empty() && invalid.is_empty() {
        out.push_str("No violations.\n");
        return out;
    }

    if !violating.is_empty() {
        out.push_str("## Violations\n\n");
        for m in violating {
            out.push_str(&format!("### `{}`\n\n", m.path));
            for p in &m.violations {
                out.push_str(&format!("- `{}` : `{}`\n", p.name, p.version));
            }
            out.push('\n');
        }
    }

    if !invalid.is_empty() {
        out.push_str("## Unreadable manifests\n\n");
        for m in invalid {
            out.push_str(&format!(
                "- `{}`: {}\n",
                m.path,
                m.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    out
}
