use anyhow::Context;
use depgate_domain::policy::PolicyMode;
use depgate_render::{
    RenderableData, RenderableFinding, RenderableManifest, RenderableManifestStatus,
    RenderableReport, RenderableSeverity, RenderableVerdictStatus,
};
use depgate_types::{
    DepgateData, DepgateReportV1, ManifestStatus, ReportEnvelope, RunError, SCHEMA_REPORT_V1,
    ToolMeta, Verdict, ViolationReport, ids,
};
use time::OffsetDateTime;

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "depgate".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

pub(crate) fn envelope(
    started_at: OffsetDateTime,
    verdict: Verdict,
    violations: Vec<ViolationReport>,
    error: Option<RunError>,
    data: DepgateData,
) -> DepgateReportV1 {
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        violations,
        error,
        data,
    }
}

pub fn parse_report_json(text: &str) -> anyhow::Result<DepgateReportV1> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse depgate v1 report")
}

pub fn serialize_report(report: &DepgateReportV1) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Report for a run that touched no manifest. The policy is never fetched.
pub(crate) fn skip_report(started_at: OffsetDateTime, data: DepgateData) -> DepgateReportV1 {
    envelope(started_at, Verdict::Skip, Vec::new(), None, data)
}

/// Report for a run aborted by a fatal error (config, change-set, or policy failure).
pub fn runtime_error_report(code: &str, message: &str, data: DepgateData) -> DepgateReportV1 {
    envelope(
        OffsetDateTime::now_utc(),
        Verdict::Fail,
        Vec::new(),
        Some(RunError {
            code: code.to_string(),
            message: message.to_string(),
        }),
        data,
    )
}

pub fn to_renderable(report: &DepgateReportV1) -> RenderableReport {
    let verdict = match report.verdict {
        Verdict::Pass => RenderableVerdictStatus::Pass,
        Verdict::Warn => RenderableVerdictStatus::Warn,
        Verdict::Fail => RenderableVerdictStatus::Fail,
        Verdict::Skip => RenderableVerdictStatus::Skip,
    };
    let severity = if report.verdict == Verdict::Fail {
        RenderableSeverity::Error
    } else {
        RenderableSeverity::Warning
    };
    let mode = report
        .data
        .policy
        .as_deref()
        .and_then(|p| p.parse::<PolicyMode>().ok())
        .unwrap_or(PolicyMode::Allow);

    let manifests = report
        .data
        .manifests
        .iter()
        .map(|m| RenderableManifest {
            path: m.path.clone(),
            status: match m.status {
                ManifestStatus::Conforming => RenderableManifestStatus::Conforming,
                ManifestStatus::Violations => RenderableManifestStatus::Violations,
                ManifestStatus::Invalid => RenderableManifestStatus::Invalid,
            },
            dependencies_evaluated: m.dependencies_evaluated,
            violations: report
                .violations
                .iter()
                .find(|v| v.file_path == m.path)
                .map(|v| v.packages.clone())
                .unwrap_or_default(),
            error: m.error.as_ref().map(|e| e.message.clone()),
        })
        .collect();

    let mut findings = Vec::new();
    for m in &report.data.manifests {
        if let Some(err) = &m.error {
            findings.push(RenderableFinding {
                severity: RenderableSeverity::Error,
                check_id: ids::CHECK_MANIFEST_PARSE.to_string(),
                code: err.code.clone(),
                message: err.message.clone(),
                path: m.path.clone(),
            });
        }
    }
    for v in &report.violations {
        for p in &v.packages {
            let message = match mode {
                PolicyMode::Allow => format!("{p} is not on the allow list"),
                PolicyMode::Prohibit => format!("{p} is on the prohibit list"),
            };
            findings.push(RenderableFinding {
                severity,
                check_id: mode.check_id().to_string(),
                code: mode.violation_code().to_string(),
                message,
                path: v.file_path.clone(),
            });
        }
    }

    RenderableReport {
        verdict,
        policy_entries: report.data.policy_entries.clone(),
        manifests,
        findings,
        data: RenderableData {
            policy: report.data.policy.clone(),
            files_changed: report.data.files_changed,
            manifests_changed: report.data.manifests_changed,
            violations_total: report.data.violations_total,
            error: report.error.as_ref().map(|e| e.message.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depgate_types::{ManifestSummary, PackageRef};

    fn sample() -> DepgateReportV1 {
        let data = DepgateData {
            policy: Some("prohibit".to_string()),
            policy_url: Some("https://example.test/policy.json".to_string()),
            files_changed: 3,
            manifests_changed: 2,
            policy_entries: vec![PackageRef::new("left-pad", "*")],
            manifests: vec![
                ManifestSummary {
                    path: "package.json".to_string(),
                    status: ManifestStatus::Violations,
                    dependencies_evaluated: 2,
                    violations: 1,
                    error: None,
                },
                ManifestSummary {
                    path: "web/package.json".to_string(),
                    status: ManifestStatus::Invalid,
                    dependencies_evaluated: 0,
                    violations: 0,
                    error: Some(RunError {
                        code: ids::CODE_MANIFEST_INVALID.to_string(),
                        message: "web/package.json: manifest is not valid JSON".to_string(),
                    }),
                },
            ],
            violations_total: 1,
            ..DepgateData::default()
        };
        envelope(
            OffsetDateTime::now_utc(),
            Verdict::Fail,
            vec![ViolationReport {
                file_path: "package.json".to_string(),
                packages: vec![PackageRef::new("left-pad", "1.3.0")],
            }],
            None,
            data,
        )
    }

    #[test]
    fn report_json_round_trips() {
        let report = sample();
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.contains("\"schema\": \"depgate.report.v1\""));
        assert!(text.contains("\"filePath\": \"package.json\""));

        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed.verdict, Verdict::Fail);
        assert_eq!(parsed.violations, report.violations);
        assert_eq!(parsed.data, report.data);
    }

    #[test]
    fn parse_rejects_foreign_schema() {
        let err = parse_report_json(r#"{ "schema": "other.report.v1" }"#).expect_err("schema");
        assert!(err.to_string().contains("unknown report schema"));
    }

    #[test]
    fn renderable_joins_violations_and_builds_findings() {
        let r = to_renderable(&sample());
        assert_eq!(r.verdict, RenderableVerdictStatus::Fail);
        assert_eq!(r.manifests[0].violations, vec![PackageRef::new("left-pad", "1.3.0")]);
        assert!(r.manifests[1].violations.is_empty());

        assert_eq!(r.findings.len(), 2);
        assert_eq!(r.findings[0].code, ids::CODE_MANIFEST_INVALID);
        assert_eq!(r.findings[1].check_id, ids::CHECK_POLICY_PROHIBIT);
        assert_eq!(r.findings[1].code, ids::CODE_PACKAGE_PROHIBITED);
        assert_eq!(r.findings[1].message, "left-pad : 1.3.0 is on the prohibit list");
        assert_eq!(r.findings[1].severity, RenderableSeverity::Error);
    }

    #[test]
    fn runtime_error_report_fails_with_code() {
        let report = runtime_error_report(
            ids::CODE_POLICY_FETCH_ERROR,
            "failed to download policy",
            DepgateData::default(),
        );
        assert_eq!(report.verdict, Verdict::Fail);
        let err = report.error.as_ref().expect("error");
        assert_eq!(err.code, ids::CODE_POLICY_FETCH_ERROR);
        assert_eq!(
            to_renderable(&report).data.error.as_deref(),
            Some("failed to download policy")
        );
    }
}
