use serde::Deserialize;
use std::fmt;

pub const EVENT_PUSH: &str = "push";
pub const EVENT_PULL_REQUEST: &str = "pull_request";

/// The commits a triggering event refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeSetEvent {
    /// Commits carried inline in the push payload.
    Push { commits: Vec<PushCommit> },
    /// Commits listed from the pull request's `commits_url`.
    PullRequest { commits_url: String },
    /// Any other event kind. Contributes no commits.
    Other { name: String },
}

impl ChangeSetEvent {
    /// Whether collecting the change-set has to call the GitHub API at all.
    ///
    /// A push with no distinct single-parent commit has nothing to fetch.
    pub fn needs_commit_lookup(&self) -> bool {
        match self {
            ChangeSetEvent::Push { commits } => commits
                .iter()
                .any(|c| c.distinct && c.parents.len() <= 1),
            ChangeSetEvent::PullRequest { .. } => true,
            ChangeSetEvent::Other { .. } => false,
        }
    }
}

/// An event together with the repository it was raised for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventContext {
    pub event: ChangeSetEvent,
    pub repository: Option<RepoSlug>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ParentRef {
    #[serde(default)]
    pub sha: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PushCommit {
    pub id: String,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub parents: Vec<ParentRef>,
}

/// `owner/name` of a GitHub repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    /// Parse `owner/name` (the `GITHUB_REPOSITORY` format).
    pub fn parse(s: &str) -> Option<Self> {
        let (owner, name) = s.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("event payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("'{event}' event requires a payload (GITHUB_EVENT_PATH)")]
    MissingPayload { event: String },
    #[error("'{event}' event payload is missing '{field}'")]
    MissingField { event: String, field: &'static str },
}

#[derive(Debug, Default, Deserialize)]
struct Payload {
    #[serde(default)]
    commits: Option<Vec<PushCommit>>,
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
    #[serde(default)]
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    commits_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    owner: Option<OwnerPayload>,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    login: Option<String>,
}

impl RepositoryPayload {
    fn slug(&self) -> Option<RepoSlug> {
        if let Some(slug) = self.full_name.as_deref().and_then(RepoSlug::parse) {
            return Some(slug);
        }
        let owner = self.owner.as_ref()?;
        let owner = owner.name.clone().or_else(|| owner.login.clone())?;
        Some(RepoSlug {
            owner,
            name: self.name.clone()?,
        })
    }
}

/// Interpret the triggering event. Only `push` and `pull_request` need a payload.
pub fn load_event(name: &str, payload: Option<&str>) -> Result<EventContext, EventError> {
    let needs_payload = matches!(name, EVENT_PUSH | EVENT_PULL_REQUEST);
    let payload: Payload = match payload {
        Some(text) => serde_json::from_str(text)?,
        None if needs_payload => {
            return Err(EventError::MissingPayload {
                event: name.to_string(),
            });
        }
        None => Payload::default(),
    };

    let repository = payload.repository.as_ref().and_then(RepositoryPayload::slug);

    let event = match name {
        EVENT_PUSH => ChangeSetEvent::Push {
            commits: payload.commits.ok_or_else(|| EventError::MissingField {
                event: name.to_string(),
                field: "commits",
            })?,
        },
        EVENT_PULL_REQUEST => ChangeSetEvent::PullRequest {
            commits_url: payload
                .pull_request
                .and_then(|pr| pr.commits_url)
                .ok_or_else(|| EventError::MissingField {
                    event: name.to_string(),
                    field: "pull_request.commits_url",
                })?,
        },
        other => ChangeSetEvent::Other {
            name: other.to_string(),
        },
    };

    Ok(EventContext { event, repository })
}
