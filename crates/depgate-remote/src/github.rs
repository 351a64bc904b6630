use crate::event::{ParentRef, RepoSlug};
use crate::http_client_builder;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK};
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const PER_PAGE: u32 = 100;
const LOG_TARGET: &str = "depgate::github";

/// Commit entry of a pull request's commit listing.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CommitSummary {
    pub sha: String,
    #[serde(default)]
    pub parents: Vec<ParentRef>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Unknown,
}

impl FileStatus {
    pub fn is_added_or_modified(self) -> bool {
        matches!(self, FileStatus::Added | FileStatus::Modified)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CommitFile {
    pub filename: String,
    pub status: FileStatus,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    #[serde(default)]
    files: Vec<CommitFile>,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("github-token is not a valid header value")]
    InvalidToken,
    #[error("repository unknown (no repository in the event payload and GITHUB_REPOSITORY unset)")]
    UnknownRepository,
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Lists commits and their changed files.
pub trait CommitSource {
    fn list_pull_request_commits(&self, commits_url: &str) -> Result<Vec<CommitSummary>, SourceError>;
    fn changed_files(&self, sha: &str) -> Result<Vec<CommitFile>, SourceError>;
}

/// Blocking GitHub REST client authenticated with a workflow token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    repository: RepoSlug,
}

impl GitHubClient {
    pub fn new(
        token: &str,
        api_url: impl Into<String>,
        repository: RepoSlug,
    ) -> Result<Self, SourceError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| SourceError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );

        let http = http_client_builder()
            .default_headers(headers)
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            repository,
        })
    }

    /// GET `url` and every page its `Link: rel="next"` chain points to.
    fn get_all_pages<P, T>(&self, url: &str, items: impl Fn(P) -> Vec<T>) -> Result<Vec<T>, SourceError>
    where
        P: DeserializeOwned,
    {
        let mut out = Vec::new();
        let mut next = Some(with_per_page(url));

        while let Some(url) = next.take() {
            log::debug!(target: LOG_TARGET, "GET {url}");
            let http_err = |source| SourceError::Http {
                url: url.clone(),
                source,
            };

            let resp = self
                .http
                .get(&url)
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(http_err)?;

            next = resp
                .headers()
                .get(LINK)
                .and_then(|h| h.to_str().ok())
                .and_then(next_link);

            let page: P = resp.json().map_err(http_err)?;
            out.extend(items(page));
        }

        Ok(out)
    }
}

impl CommitSource for GitHubClient {
    fn list_pull_request_commits(&self, commits_url: &str) -> Result<Vec<CommitSummary>, SourceError> {
        self.get_all_pages(commits_url, |page: Vec<CommitSummary>| page)
    }

    fn changed_files(&self, sha: &str) -> Result<Vec<CommitFile>, SourceError> {
        let url = format!(
            "{}/repos/{}/{}/commits/{sha}",
            self.api_url, self.repository.owner, self.repository.name
        );
        self.get_all_pages(&url, |detail: CommitDetail| detail.files)
    }
}

fn with_per_page(url: &str) -> String {
    if url.contains("per_page=") {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}per_page={PER_PAGE}")
}

/// Extract the `rel="next"` target from an RFC 8288 `Link` header.
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
