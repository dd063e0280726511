//! Owner/repository extraction from free-form GitHub URLs.
//!
//! Links scraped out of markdown carry all kinds of debris: `.git` suffixes,
//! closing parentheses, trailing punctuation, `/tree/main/...` subpaths.
//! [`RepoId::from_url`] digs the `owner/name` pair out of all of them.

use std::sync::LazyLock;

use regex::Regex;
use tooldb_shared::REPO_HOST;

/// Matches `github.com/<owner>/<name...>` anywhere in a string.
static REPO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)github\.com/([^/\s?#]+)/([^/\s?#]+)").expect("repo url regex")
});

/// First path segments that belong to GitHub itself rather than to an owner.
const RESERVED_OWNERS: &[&str] = &[
    "topics",
    "sponsors",
    "orgs",
    "marketplace",
    "collections",
    "apps",
    "features",
    "settings",
];

const TRAILING_JUNK: &[char] = &[')', '(', ']', '[', '>', '.', ',', ';', ':', '"', '\'', '!'];

/// An `owner/name` repository identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// Extract an identity from an arbitrary URL string.
    ///
    /// Returns `None` when the string does not point at a repository.
    pub fn from_url(url: &str) -> Option<Self> {
        let caps = REPO_URL_RE.captures(url)?;

        let owner = sanitize(caps[1].trim_end_matches(TRAILING_JUNK));
        if owner.is_empty() || RESERVED_OWNERS.contains(&owner.to_ascii_lowercase().as_str()) {
            return None;
        }

        let mut name = caps[2].trim_end_matches(TRAILING_JUNK);
        if name.len() > 4 && name.to_ascii_lowercase().ends_with(".git") {
            name = name[..name.len() - 4].trim_end_matches(TRAILING_JUNK);
        }
        let name = sanitize(name);
        if name.is_empty() {
            return None;
        }

        Some(Self { owner, name })
    }

    /// Case-insensitive key used to spot the same repository twice.
    pub fn dedup_key(&self) -> String {
        format!("{}/{}", self.owner, self.name).to_lowercase()
    }

    /// Canonical web URL, `https://github.com/<owner>/<name>`.
    pub fn web_url(&self) -> String {
        format!("https://{REPO_HOST}/{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Keep only characters that can appear in an owner or repository name.
fn sanitize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(url: &str) -> Option<(String, String)> {
        RepoId::from_url(url).map(|r| (r.owner, r.name))
    }

    #[test]
    fn plain_repo_url() {
        assert_eq!(
            id("https://github.com/junegunn/fzf"),
            Some(("junegunn".into(), "fzf".into()))
        );
    }

    #[test]
    fn strips_git_suffix_and_markdown_debris() {
        assert_eq!(
            id("https://github.com/owner/repo.git)"),
            Some(("owner".into(), "repo".into()))
        );
        assert_eq!(
            id("https://github.com/owner/repo)."),
            Some(("owner".into(), "repo".into()))
        );
        assert_eq!(
            id("https://github.com/owner/Repo.GIT"),
            Some(("owner".into(), "Repo".into()))
        );
    }

    #[test]
    fn ignores_subpaths_queries_and_fragments() {
        assert_eq!(
            id("https://github.com/BurntSushi/ripgrep/tree/master/crates"),
            Some(("BurntSushi".into(), "ripgrep".into()))
        );
        assert_eq!(
            id("https://github.com/sharkdp/bat#installation"),
            Some(("sharkdp".into(), "bat".into()))
        );
        assert_eq!(
            id("https://github.com/sharkdp/fd?tab=readme"),
            Some(("sharkdp".into(), "fd".into()))
        );
    }

    #[test]
    fn keeps_dots_in_names() {
        assert_eq!(
            id("https://github.com/vercel/next.js"),
            Some(("vercel".into(), "next.js".into()))
        );
    }

    #[test]
    fn rejects_non_repository_urls() {
        assert_eq!(id("https://gitlab.com/owner/repo"), None);
        assert_eq!(id("https://github.com/owner"), None);
        assert_eq!(id("https://github.com/topics/cli"), None);
        assert_eq!(id("https://example.com"), None);
    }

    #[test]
    fn host_match_is_case_insensitive() {
        assert_eq!(
            id("https://GitHub.com/Owner/Repo"),
            Some(("Owner".into(), "Repo".into()))
        );
    }

    #[test]
    fn dedup_key_and_web_url() {
        let a = RepoId::from_url("https://github.com/A/B").unwrap();
        let b = RepoId::from_url("https://github.com/a/b.git").unwrap();
        assert_eq!(a.dedup_key(), b.dedup_key());
        assert_eq!(a.web_url(), "https://github.com/A/B");
        assert_eq!(b.to_string(), "a/b");
    }
}
