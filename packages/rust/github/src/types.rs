//! Wire records returned by the GitHub REST API.
//!
//! Only the fields the pipelines read are modelled; everything else in the
//! payload is ignored by serde.

use serde::Deserialize;

/// One repository as returned by `/search/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub fork: bool,
}

/// Envelope of a repository search response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<RawRepo>,
}

/// A single repository looked up by `owner/name`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoDetails {
    pub stargazers_count: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// A file entry from `/repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    #[serde(default)]
    pub path: Option<String>,
    /// Where the raw file can be fetched. Absent for directories.
    #[serde(default)]
    pub download_url: Option<String>,
}
