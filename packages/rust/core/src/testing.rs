//! In-memory [`RepoSource`] used by the pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;

use tooldb_github::{ContentEntry, RawRepo, RepoDetails, RepoSource};
use tooldb_shared::{Result, ToolDbError};

/// Canned responses keyed by query, `owner/repo`, or URL. Anything missing
/// behaves like a failed request.
#[derive(Default)]
pub(crate) struct FakeSource {
    searches: HashMap<String, Vec<RawRepo>>,
    stars: HashMap<String, u64>,
    contents: HashMap<String, Option<String>>,
    files: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, repos: Vec<RawRepo>) -> Self {
        self.searches.insert(query.to_string(), repos);
        self
    }

    pub fn with_stars(mut self, full_name: &str, stars: u64) -> Self {
        self.stars.insert(full_name.to_string(), stars);
        self
    }

    /// Register a list file served at `https://raw.test/<owner>/<repo>/<path>`.
    pub fn with_file(mut self, owner: &str, repo: &str, path: &str, text: &str) -> Self {
        let download = format!("https://raw.test/{owner}/{repo}/{path}");
        self.contents
            .insert(format!("{owner}/{repo}/{path}"), Some(download.clone()));
        self.files.insert(download, text.to_string());
        self
    }

    /// Register a contents entry that lacks a download location.
    pub fn with_directory(mut self, owner: &str, repo: &str, path: &str) -> Self {
        self.contents.insert(format!("{owner}/{repo}/{path}"), None);
        self
    }

    /// Every request made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

pub(crate) fn repo(name: &str, owner: &str, stars: u64, description: Option<&str>) -> RawRepo {
    RawRepo {
        name: name.to_string(),
        html_url: format!("https://github.com/{owner}/{name}"),
        stargazers_count: stars,
        description: description.map(String::from),
        topics: Vec::new(),
        fork: false,
    }
}

impl RepoSource for FakeSource {
    async fn search_repositories(&self, query: &str, per_page: u32) -> Result<Vec<RawRepo>> {
        self.record(format!("search {query} ({per_page})"));
        self.searches
            .get(query)
            .cloned()
            .ok_or_else(|| ToolDbError::Network(format!("no canned search for '{query}'")))
    }

    async fn repository(&self, owner: &str, repo: &str) -> Result<RepoDetails> {
        self.record(format!("repo {owner}/{repo}"));
        self.stars
            .get(&format!("{owner}/{repo}"))
            .map(|&stargazers_count| RepoDetails {
                stargazers_count,
                html_url: None,
            })
            .ok_or_else(|| ToolDbError::Network(format!("{owner}/{repo}: HTTP 404 Not Found")))
    }

    async fn contents(&self, owner: &str, repo: &str, path: &str) -> Result<ContentEntry> {
        self.record(format!("contents {owner}/{repo}/{path}"));
        self.contents
            .get(&format!("{owner}/{repo}/{path}"))
            .map(|download_url| ContentEntry {
                path: Some(path.to_string()),
                download_url: download_url.clone(),
            })
            .ok_or_else(|| ToolDbError::Network(format!("{owner}/{repo}/{path}: HTTP 404")))
    }

    async fn download_text(&self, url: &str) -> Result<String> {
        self.record(format!("download {url}"));
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| ToolDbError::Network(format!("{url}: HTTP 404")))
    }
}
