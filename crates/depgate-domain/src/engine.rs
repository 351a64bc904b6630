use crate::model::{ManifestOutcome, ManifestRecord};
use crate::policy::{PolicyMode, PolicyTable};
use depgate_types::PackageRef;

/// Return the declarations that violate `policy` under `mode`, in declaration order.
pub fn evaluate(referenced: &[PackageRef], policy: &PolicyTable, mode: PolicyMode) -> Vec<PackageRef> {
    referenced
        .iter()
        .filter(|r| {
            let matched = policy.find_match(r).is_some();
            match mode {
                PolicyMode::Allow => !matched,
                PolicyMode::Prohibit => matched,
            }
        })
        .cloned()
        .collect()
}

pub fn evaluate_manifest(
    record: &ManifestRecord,
    policy: &PolicyTable,
    mode: PolicyMode,
) -> ManifestOutcome {
    ManifestOutcome::Evaluated {
        file_path: record.file_path.clone(),
        dependencies_evaluated: record.packages.len(),
        violations: evaluate(&record.packages, policy, mode),
    }
}
