use crate::model::ManifestOutcome;
use depgate_types::{Verdict, ViolationReport};

/// Final result of a run that evaluated at least one manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunResult {
    /// One entry per manifest with at least one violation, in discovery order.
    pub violations: Vec<ViolationReport>,
    /// Manifests that could not be read or parsed.
    pub failed_manifests: Vec<String>,
    pub should_fail: bool,
}

impl RunResult {
    pub fn violation_count(&self) -> usize {
        self.violations.iter().map(|v| v.packages.len()).sum()
    }

    pub fn verdict(&self) -> Verdict {
        if self.should_fail {
            Verdict::Fail
        } else if !self.violations.is_empty() {
            Verdict::Warn
        } else {
            Verdict::Pass
        }
    }
}

/// Combine per-manifest outcomes into the run result and failure decision.
pub fn aggregate(outcomes: &[ManifestOutcome], fail_if_violations: bool) -> RunResult {
    let mut result = RunResult::default();

    for outcome in outcomes {
        match outcome {
            ManifestOutcome::Evaluated {
                file_path,
                violations,
                ..
            } if !violations.is_empty() => {
                result.violations.push(ViolationReport {
                    file_path: file_path.clone(),
                    packages: violations.clone(),
                });
            }
            ManifestOutcome::Evaluated { .. } => {}
            ManifestOutcome::Failed { file_path, .. } => {
                result.failed_manifests.push(file_path.clone());
            }
        }
    }

    result.should_fail = (!result.violations.is_empty() && fail_if_violations)
        || !result.failed_manifests.is_empty();
    result
}
