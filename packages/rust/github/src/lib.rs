//! GitHub REST access for tooldb.
//!
//! The pipelines talk to GitHub only through the [`RepoSource`] trait, so
//! they can be exercised against an in-memory source in tests. [`GithubClient`]
//! is the real implementation. It performs one request per call with no
//! retry, pagination, or authentication.

mod identity;
mod types;

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tooldb_shared::{GithubConfig, Result, ToolDbError};
use tracing::{debug, instrument};
use url::Url;

pub use identity::RepoId;
pub use types::{ContentEntry, RawRepo, RepoDetails};

/// Maximum response size we accept (10 MB).
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// Default User-Agent string for API requests.
const USER_AGENT: &str = concat!("tooldb/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// RepoSource
// ---------------------------------------------------------------------------

/// The repository host as seen by the pipelines.
///
/// Every call reports failure through `Err`; deciding whether a failure is
/// fatal is left to the caller.
pub trait RepoSource {
    /// Search repositories, sorted by stars descending, one page of `per_page`.
    fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<RawRepo>>> + Send;

    /// Look up a single repository.
    fn repository(&self, owner: &str, repo: &str)
    -> impl Future<Output = Result<RepoDetails>> + Send;

    /// Describe a file inside a repository.
    fn contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> impl Future<Output = Result<ContentEntry>> + Send;

    /// Download a raw file and decode it as UTF-8.
    fn download_text(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

// ---------------------------------------------------------------------------
// Client options
// ---------------------------------------------------------------------------

/// Configuration for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the REST API.
    pub api_base: Url,
    /// Timeout for each HTTP request in seconds.
    pub timeout_secs: u64,
    /// User-Agent header; GitHub rejects requests without one.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base: Url::parse("https://api.github.com").expect("static api url"),
            timeout_secs: 30,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl TryFrom<&GithubConfig> for ClientOptions {
    type Error = ToolDbError;

    fn try_from(config: &GithubConfig) -> Result<Self> {
        let api_base = Url::parse(&config.api_base).map_err(|e| {
            ToolDbError::config(format!("invalid api_base '{}': {e}", config.api_base))
        })?;
        Ok(Self {
            api_base,
            timeout_secs: config.timeout_secs,
            user_agent: config
                .user_agent
                .clone()
                .unwrap_or_else(|| USER_AGENT.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// GithubClient
// ---------------------------------------------------------------------------

/// Unauthenticated GitHub REST client.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_base: String,
}

impl GithubClient {
    /// Build a client with the given options.
    pub fn new(opts: &ClientOptions) -> Result<Self> {
        let http = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(|e| ToolDbError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base: opts.api_base.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// GET a URL and hand back the response once status and size check out.
    async fn get_checked(&self, url: &str, accept: &str) -> Result<reqwest::Response> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await
            .map_err(|e| ToolDbError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolDbError::Network(format!("{url}: HTTP {status}")));
        }

        if let Some(len) = response.content_length() {
            if len > MAX_RESPONSE_SIZE {
                return Err(ToolDbError::validation(format!(
                    "{url}: response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
                )));
            }
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.get_checked(url, "application/vnd.github+json").await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ToolDbError::Network(format!("{url}: failed to read body: {e}")))?;

        serde_json::from_slice(&bytes).map_err(|e| ToolDbError::decode(format!("{url}: {e}")))
    }
}

impl RepoSource for GithubClient {
    #[instrument(skip(self))]
    async fn search_repositories(&self, query: &str, per_page: u32) -> Result<Vec<RawRepo>> {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let url = self.endpoint(&format!(
            "search/repositories?q={encoded}&sort=stars&order=desc&per_page={per_page}"
        ));

        let response: types::SearchResponse = self.get_json(&url).await?;
        debug!(items = response.items.len(), "search returned");
        Ok(response.items)
    }

    #[instrument(skip(self))]
    async fn repository(&self, owner: &str, repo: &str) -> Result<RepoDetails> {
        let url = self.endpoint(&format!("repos/{owner}/{repo}"));
        self.get_json(&url).await
    }

    #[instrument(skip(self))]
    async fn contents(&self, owner: &str, repo: &str, path: &str) -> Result<ContentEntry> {
        let url = self.endpoint(&format!("repos/{owner}/{repo}/contents/{path}"));
        self.get_json(&url).await
    }

    #[instrument(skip(self))]
    async fn download_text(&self, url: &str) -> Result<String> {
        let response = self.get_checked(url, "text/plain").await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ToolDbError::Network(format!("{url}: failed to read body: {e}")))?;

        String::from_utf8(bytes.to_vec())
            .map_err(|e| ToolDbError::decode(format!("{url}: not valid UTF-8: {e}")))
    }
}
