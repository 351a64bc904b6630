//! The `check` use case: evaluate changed manifests against the policy and produce a report.

use depgate_domain::model::ManifestOutcome;
use depgate_domain::policy::{EffectiveConfig, PolicyParseError, PolicyTable};
use depgate_domain::report::RunResult;
use depgate_remote::{PolicyFetchError, PolicySource};
use depgate_repo::{ManifestReader, load_manifest, locate_manifests};
use depgate_types::{
    DepgateData, DepgateReportV1, ManifestStatus, ManifestSummary, RunError, Verdict, ids,
};
use time::OffsetDateTime;

use crate::report::{envelope, skip_report};

const LOG_TARGET: &str = "depgate::check";

/// Input for the check use case. The config has already been validated.
#[derive(Clone, Debug)]
pub struct CheckInput {
    pub config: EffectiveConfig,
    /// Paths added or modified by the change-set, in commit order.
    pub changed_files: Vec<String>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: DepgateReportV1,
    /// `None` when no manifest was touched and nothing was evaluated.
    pub result: Option<RunResult>,
}

/// Fatal failures of a check run. Per-manifest failures are outcomes, not errors.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    PolicyFetch(#[from] PolicyFetchError),
    #[error("invalid policy document: {0}")]
    PolicyParse(#[from] PolicyParseError),
}

impl CheckError {
    pub fn code(&self) -> &'static str {
        match self {
            CheckError::PolicyFetch(_) => ids::CODE_POLICY_FETCH_ERROR,
            CheckError::PolicyParse(_) => ids::CODE_POLICY_PARSE_ERROR,
        }
    }
}

/// Base report payload for a run with the given config; shared with fatal-error reports.
pub fn config_data(config: &EffectiveConfig, files_changed: usize) -> DepgateData {
    DepgateData {
        policy: Some(config.mode.as_str().to_string()),
        policy_url: Some(config.policy_url.clone()),
        fail_if_violations: config.fail_if_violations,
        include_dev_dependencies: config.include_dev_dependencies,
        files_changed: count(files_changed),
        ..DepgateData::default()
    }
}

/// Run the check use case: locate manifests, load the policy, evaluate, aggregate.
pub fn run_check(
    input: &CheckInput,
    reader: &dyn ManifestReader,
    policy_source: &dyn PolicySource,
) -> Result<CheckOutput, CheckError> {
    let started_at = OffsetDateTime::now_utc();
    let config = &input.config;
    let mut data = config_data(config, input.changed_files.len());

    let locations = locate_manifests(&input.changed_files);
    data.manifests_changed = count(locations.len());

    if locations.is_empty() {
        log::info!(target: LOG_TARGET, "no package.json manifest among {} changed file(s)", input.changed_files.len());
        return Ok(CheckOutput {
            report: skip_report(started_at, data),
            result: None,
        });
    }

    log::info!(target: LOG_TARGET, "downloading {} policy from {}", config.mode, config.policy_url);
    let policy_text = policy_source.fetch_policy(&config.policy_url)?;
    let policy = PolicyTable::from_json_str(&policy_text)?;
    log::info!(target: LOG_TARGET, "policy lists {} package(s)", policy.len());
    data.policy_entries = policy.entries().to_vec();

    let mut outcomes = Vec::with_capacity(locations.len());
    for location in &locations {
        log::debug!(target: LOG_TARGET, "evaluating '{}'", location.path);
        let (outcome, summary) =
            match load_manifest(reader, location, config.include_dev_dependencies) {
                Ok(record) => {
                    let outcome =
                        depgate_domain::evaluate_manifest(&record, &policy, config.mode);
                    let summary = evaluated_summary(&outcome);
                    (outcome, summary)
                }
                Err(err) => {
                    log::error!(target: LOG_TARGET, "{err}");
                    let path = location.path.as_str().to_string();
                    let summary = ManifestSummary {
                        path: path.clone(),
                        status: ManifestStatus::Invalid,
                        dependencies_evaluated: 0,
                        violations: 0,
                        error: Some(RunError {
                            code: err.code().to_string(),
                            message: err.to_string(),
                        }),
                    };
                    let outcome = ManifestOutcome::Failed {
                        file_path: path,
                        reason: err.to_string(),
                    };
                    (outcome, summary)
                }
            };
        outcomes.push(outcome);
        data.manifests.push(summary);
    }

    let result = depgate_domain::aggregate(&outcomes, config.fail_if_violations);
    data.violations_total = count(result.violation_count());

    let verdict = result.verdict();
    match verdict {
        Verdict::Fail => log::warn!(target: LOG_TARGET, "check failed: {} violation(s), {} failed manifest(s)", result.violation_count(), result.failed_manifests.len()),
        Verdict::Warn => log::warn!(target: LOG_TARGET, "{} violation(s) reported without failing the run", result.violation_count()),
        _ => log::info!(target: LOG_TARGET, "all evaluated manifests conform to the policy"),
    }

    let report = envelope(started_at, verdict, result.violations.clone(), None, data);
    Ok(CheckOutput {
        report,
        result: Some(result),
    })
}

fn evaluated_summary(outcome: &ManifestOutcome) -> ManifestSummary {
    let (dependencies_evaluated, violations) = match outcome {
        ManifestOutcome::Evaluated {
            dependencies_evaluated,
            violations,
            ..
        } => (*dependencies_evaluated, violations.len()),
        ManifestOutcome::Failed { .. } => (0, 0),
    };
    ManifestSummary {
        path: outcome.file_path().to_string(),
        status: if violations > 0 {
            ManifestStatus::Violations
        } else {
            ManifestStatus::Conforming
        },
        dependencies_evaluated: count(dependencies_evaluated),
        violations: count(violations),
        error: None,
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Map verdict to exit code: 0 = pass/warn/skip, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass | Verdict::Warn | Verdict::Skip => 0,
        Verdict::Fail => 2,
    }
}
