//! Collect the change-set of the triggering GitHub event.

use depgate_remote::event::{EVENT_PULL_REQUEST, EVENT_PUSH};
use depgate_remote::{
    ChangeSetEvent, EventError, GitHubClient, RepoSlug, SourceError, collect_changed_files,
    load_event,
};
use depgate_settings::{ConfigError, ResolvedConfig};
use depgate_types::ids;

const LOG_TARGET: &str = "depgate::changeset";

/// Event source as exposed by the GitHub Actions runner environment.
#[derive(Clone, Copy, Debug)]
pub struct EventSourceInput<'a> {
    /// `GITHUB_EVENT_NAME`.
    pub event_name: &'a str,
    /// Contents of the file at `GITHUB_EVENT_PATH`, if any.
    pub payload: Option<&'a str>,
    /// `GITHUB_API_URL`.
    pub api_url: &'a str,
    /// `GITHUB_REPOSITORY`, used when the payload names no repository.
    pub repository: Option<&'a str>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChangeSetError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Event(#[from] EventError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl ChangeSetError {
    pub fn code(&self) -> &'static str {
        match self {
            ChangeSetError::Config(_) => ids::CODE_CONFIG_ERROR,
            ChangeSetError::Event(_) | ChangeSetError::Source(_) => ids::CODE_CHANGE_SET_ERROR,
        }
    }
}

/// Paths added or modified by the event's non-merge commits.
///
/// Events other than `push` and `pull_request` yield an empty change-set without
/// requiring a token or touching the network.
pub fn collect_event_files(
    input: EventSourceInput<'_>,
    config: &ResolvedConfig,
) -> Result<Vec<String>, ChangeSetError> {
    if !matches!(input.event_name, EVENT_PUSH | EVENT_PULL_REQUEST) {
        log::info!(target: LOG_TARGET, "event '{}' carries no commits to inspect", input.event_name);
        return Ok(Vec::new());
    }

    let token = config.require_github_token()?;
    let ctx = load_event(input.event_name, input.payload)?;

    if let ChangeSetEvent::Push { commits } = &ctx.event {
        log::info!(target: LOG_TARGET, "push event with {} commit(s)", commits.len());
    }
    if !ctx.event.needs_commit_lookup() {
        log::info!(target: LOG_TARGET, "no commits to inspect");
        return Ok(Vec::new());
    }

    let repository = ctx
        .repository
        .or_else(|| input.repository.and_then(RepoSlug::parse))
        .ok_or(SourceError::UnknownRepository)?;

    let client = GitHubClient::new(token, input.api_url, repository)?;
    let files = collect_changed_files(&ctx.event, &client)?;
    log::info!(target: LOG_TARGET, "{} added or modified file(s) in change-set", files.len());
    Ok(files)
}
