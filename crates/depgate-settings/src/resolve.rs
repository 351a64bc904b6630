use crate::model::DepgateConfigV1;
use depgate_domain::policy::{EffectiveConfig, InvalidPolicyMode, PolicyMode};

/// Raw run inputs as provided by the runner or the command line.
///
/// Values are kept as strings: GitHub Actions hands every input over as text and an
/// unset input arrives as the empty string, which is treated as "not provided".
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub policy: Option<String>,
    pub policy_url: Option<String>,
    pub github_token: Option<String>,
    pub fail_if_violations: Option<String>,
    pub include_dev_dependencies: Option<String>,
}

#[derive(Clone)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    github_token: Option<String>,
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("effective", &self.effective)
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ResolvedConfig {
    /// The token is only needed when commits are listed through the GitHub API.
    pub fn require_github_token(&self) -> Result<&str, ConfigError> {
        self.github_token
            .as_deref()
            .ok_or(ConfigError::MissingGithubToken)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid depgate config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("policy must be set to 'allow' or 'prohibit'")]
    MissingPolicy,
    #[error(transparent)]
    InvalidPolicy(#[from] InvalidPolicyMode),
    #[error("policy-url not set")]
    MissingPolicyUrl,
    #[error("github-token not set (required to list commits through the GitHub API)")]
    MissingGithubToken,
    #[error("input '{input}' must be 'true' or 'false' (got '{value}')")]
    InvalidBoolean { input: &'static str, value: String },
}

pub fn resolve_config(
    cfg: DepgateConfigV1,
    overrides: Overrides,
) -> Result<ResolvedConfig, ConfigError> {
    let policy = provided(overrides.policy)
        .or(cfg.policy)
        .ok_or(ConfigError::MissingPolicy)?;
    let mode: PolicyMode = policy.parse()?;

    let policy_url = provided(overrides.policy_url)
        .or(cfg.policy_url)
        .filter(|u| !u.trim().is_empty())
        .ok_or(ConfigError::MissingPolicyUrl)?;

    let fail_if_violations = match provided(overrides.fail_if_violations) {
        Some(v) => parse_bool_input("fail-if-violations", &v)?,
        None => cfg.fail_if_violations.unwrap_or(false),
    };

    let include_dev_dependencies = match provided(overrides.include_dev_dependencies) {
        Some(v) => parse_bool_input("include-dev-dependencies", &v)?,
        None => cfg.include_dev_dependencies.unwrap_or(false),
    };

    Ok(ResolvedConfig {
        effective: EffectiveConfig {
            mode,
            policy_url,
            fail_if_violations,
            include_dev_dependencies,
        },
        github_token: provided(overrides.github_token),
    })
}

fn provided(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

fn parse_bool_input(input: &'static str, v: &str) -> Result<bool, ConfigError> {
    match v.trim() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(ConfigError::InvalidBoolean {
            input,
            value: other.to_string(),
        }),
    }
}
