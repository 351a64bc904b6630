use crate::{RenderableReport, RenderableSeverity};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    report
        .findings
        .iter()
        .map(|f| {
            let level = match f.severity {
                RenderableSeverity::Error => "error",
                RenderableSeverity::Warning => "warning",
            };
            let message = escape_data(&format!("[{}:{}] {}", f.check_id, f.code, f.message));
            format!("::{level} file={}::{message}", escape_property(&f.path))
        })
        .collect()
}

/// A run-level `::error::` command, not tied to a file.
pub fn render_error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Escape a workflow command message (`%`, `\r`, `\n`).
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableData, RenderableFinding, RenderableVerdictStatus};

    fn finding(severity: RenderableSeverity, path: &str, message: &str) -> RenderableFinding {
        RenderableFinding {
            severity,
            check_id: "policy.allow".to_string(),
            code: "package_not_allowed".to_string(),
            message: message.to_string(),
            path: path.to_string(),
        }
    }

    fn report(findings: Vec<RenderableFinding>) -> RenderableReport {
        RenderableReport {
            verdict: RenderableVerdictStatus::Warn,
            policy_entries: Vec::new(),
            manifests: Vec::new(),
            findings,
            data: RenderableData::default(),
        }
    }

    #[test]
    fn renders_one_annotation_per_finding() {
        let lines = render_github_annotations(&report(vec![
            finding(
                RenderableSeverity::Warning,
                "web/package.json",
                "axios : 1.6.0 is not on the allow list",
            ),
            finding(RenderableSeverity::Error, "package.json", "zod : 3.0.0 is not on the allow list"),
        ]));
        assert_eq!(
            lines,
            vec![
                "::warning file=web/package.json::[policy.allow:package_not_allowed] axios : 1.6.0 is not on the allow list",
                "::error file=package.json::[policy.allow:package_not_allowed] zod : 3.0.0 is not on the allow list",
            ]
        );
    }

    #[test]
    fn escapes_workflow_command_characters() {
        let lines = render_github_annotations(&report(vec![finding(
            RenderableSeverity::Error,
            "odd,dir:x/package.json",
            "100% broken\nsecond line",
        )]));
        assert_eq!(
            lines[0],
            "::error file=odd%2Cdir%3Ax/package.json::[policy.allow:package_not_allowed] 100%25 broken%0Asecond line"
        );
    }

    #[test]
    fn error_command_escapes_percent_and_line_breaks() {
        assert_eq!(
            render_error_command("GET http://h/p%20x.json failed\r\ncaused by: refused"),
            "::error::GET http://h/p%2520x.json failed%0D%0Acaused by: refused"
        );
    }

    #[test]
    fn no_findings_no_annotations() {
        assert!(render_github_annotations(&report(Vec::new())).is_empty());
    }
}
