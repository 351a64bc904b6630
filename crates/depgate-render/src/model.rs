use depgate_types::PackageRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
    Skip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableManifestStatus {
    Conforming,
    Violations,
    Invalid,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableManifest {
    pub path: String,
    pub status: RenderableManifestStatus,
    pub dependencies_evaluated: u32,
    pub violations: Vec<PackageRef>,
    pub error: Option<String>,
}

/// One annotatable problem: a violating package or a manifest that failed to load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub severity: RenderableSeverity,
    pub check_id: String,
    pub code: String,
    pub message: String,
    pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableData {
    pub policy: Option<String>,
    pub files_changed: u32,
    pub manifests_changed: u32,
    pub violations_total: u32,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub policy_entries: Vec<PackageRef>,
    pub manifests: Vec<RenderableManifest>,
    pub findings: Vec<RenderableFinding>,
    pub data: RenderableData,
}
