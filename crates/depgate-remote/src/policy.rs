use crate::http_client_builder;
use reqwest::blocking::Client;

const LOG_TARGET: &str = "depgate::policy";

#[derive(Debug, thiserror::Error)]
pub enum PolicyFetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to download policy from '{url}': {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Retrieves the raw policy document.
pub trait PolicySource {
    fn fetch_policy(&self, url: &str) -> Result<String, PolicyFetchError>;
}

/// Unauthenticated HTTP GET of the policy document.
#[derive(Debug, Clone)]
pub struct HttpPolicySource {
    http: Client,
}

impl HttpPolicySource {
    pub fn new() -> Result<Self, PolicyFetchError> {
        let http = http_client_builder()
            .build()
            .map_err(PolicyFetchError::Client)?;
        Ok(Self { http })
    }
}

impl PolicySource for HttpPolicySource {
    fn fetch_policy(&self, url: &str) -> Result<String, PolicyFetchError> {
        log::debug!(target: LOG_TARGET, "GET {url}");
        self.http
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|source| PolicyFetchError::Http {
                url: url.to_string(),
                source,
            })
    }
}
