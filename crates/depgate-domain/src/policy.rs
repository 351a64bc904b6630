use crate::version::{WILDCARD, normalize_version, versions_equal};
use depgate_types::{PackageRef, ids};
use serde_json::Value;
use std::str::FromStr;

/// How the policy table is applied to declared dependencies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyMode {
    /// Only listed packages/versions are permitted.
    Allow,
    /// Listed packages/versions are forbidden.
    Prohibit,
}

impl PolicyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyMode::Allow => "allow",
            PolicyMode::Prohibit => "prohibit",
        }
    }

    pub fn check_id(self) -> &'static str {
        match self {
            PolicyMode::Allow => ids::CHECK_POLICY_ALLOW,
            PolicyMode::Prohibit => ids::CHECK_POLICY_PROHIBIT,
        }
    }

    pub fn violation_code(self) -> &'static str {
        match self {
            PolicyMode::Allow => ids::CODE_PACKAGE_NOT_ALLOWED,
            PolicyMode::Prohibit => ids::CODE_PACKAGE_PROHIBITED,
        }
    }
}

impl std::fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("policy must be set to 'allow' or 'prohibit' (got '{0}')")]
pub struct InvalidPolicyMode(pub String);

impl FromStr for PolicyMode {
    type Err = InvalidPolicyMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(PolicyMode::Allow),
            "prohibit" => Ok(PolicyMode::Prohibit),
            other => Err(InvalidPolicyMode(other.to_string())),
        }
    }
}

/// Run settings the engine needs. Built once per run and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub mode: PolicyMode,
    pub policy_url: String,
    pub fail_if_violations: bool,
    pub include_dev_dependencies: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyParseError {
    #[error("policy document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("policy document must be a JSON object mapping package names to versions")]
    NotAnObject,
    #[error("policy entry '{name}' must be a version string")]
    VersionNotString { name: String },
}

/// Policy entries in document order, read-only once loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyTable {
    entries: Vec<PackageRef>,
}

impl PolicyTable {
    pub fn new(entries: Vec<PackageRef>) -> Self {
        Self { entries }
    }

    /// Parse a flat `{ "name": "version" }` document.
    ///
    /// All-or-nothing: one malformed entry rejects the whole document.
    pub fn from_json_str(text: &str) -> Result<Self, PolicyParseError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(map) = value else {
            return Err(PolicyParseError::NotAnObject);
        };

        let mut entries = Vec::with_capacity(map.len());
        for (name, version) in map {
            let Value::String(version) = version else {
                return Err(PolicyParseError::VersionNotString { name });
            };
            entries.push(PackageRef {
                version: normalize_version(&version),
                name,
            });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PackageRef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with the same name whose version is the wildcard or an equal release.
    pub fn find_match(&self, referenced: &PackageRef) -> Option<&PackageRef> {
        self.entries.iter().find(|entry| {
            entry.name == referenced.name
                && (entry.version == WILDCARD || versions_equal(&entry.version, &referenced.version))
        })
    }
}
