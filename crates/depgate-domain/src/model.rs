use depgate_types::PackageRef;

/// Dependency declarations found in one manifest of the change-set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManifestRecord {
    /// Lowercased repo-relative path, used for reporting.
    pub file_path: String,
    /// Declarations in manifest order; duplicates are kept.
    pub packages: Vec<PackageRef>,
}

/// Result of evaluating (or failing to evaluate) one manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManifestOutcome {
    Evaluated {
        file_path: String,
        dependencies_evaluated: usize,
        violations: Vec<PackageRef>,
    },
    /// The manifest could not be read or parsed. Always fails the run.
    Failed { file_path: String, reason: String },
}

impl ManifestOutcome {
    pub fn file_path(&self) -> &str {
        match self {
            ManifestOutcome::Evaluated { file_path, .. } => file_path,
            ManifestOutcome::Failed { file_path, .. } => file_path,
        }
    }
}
