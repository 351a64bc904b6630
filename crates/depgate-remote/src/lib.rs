//! Network-facing collaborators: the triggering GitHub event, the commit listing API,
//! and the policy document download.
//!
//! Everything here is blocking; a run makes its requests one after another.

#![forbid(unsafe_code)]

mod changeset;
pub mod event;
pub mod github;
mod policy;

use std::time::Duration;

pub use changeset::collect_changed_files;
pub use event::{ChangeSetEvent, EventContext, EventError, RepoSlug, load_event};
pub use github::{CommitSource, DEFAULT_API_URL, GitHubClient, SourceError};
pub use policy::{HttpPolicySource, PolicyFetchError, PolicySource};

pub(crate) const USER_AGENT: &str = concat!("depgate/", env!("CARGO_PKG_VERSION"));
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn http_client_builder() -> reqwest::blocking::ClientBuilder {
    let builder = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT);
    // Loopback test servers must not be routed through a runner's proxy.
    #[cfg(test)]
    let builder = builder.no_proxy();
    builder
}
