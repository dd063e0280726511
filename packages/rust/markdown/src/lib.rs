//! Tool candidate extraction from curated "awesome list" markdown.
//!
//! Lists follow the usual convention:
//! - Bullets: `- [Name](url) - Description` or `* [Name](url): Description`
//! - Only the first line of an entry is read; wrapped continuation lines are
//!   ignored.
//!
//! Extraction is a single pass over the lines. Every bullet link either becomes
//! a [`Candidate`] or is recorded as a [`Rejected`] entry with the reason, so
//! filtering can be checked without touching the network.

mod cleanup;

use std::sync::LazyLock;

use regex::Regex;
use tooldb_shared::{Category, MAX_DESCRIPTION_CHARS, MIN_DESCRIPTION_CHARS, REPO_HOST, truncate_chars};
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A list entry that may become a tool once its star count is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Link text.
    pub name: String,
    /// Link target, as written in the list.
    pub url: String,
    /// Cleaned description, at most [`MAX_DESCRIPTION_CHARS`] characters.
    pub description: String,
    /// `owner/repo` of the list the entry came from.
    pub source_list: String,
    /// Category of the list.
    pub category: Category,
}

/// Why a bullet link did not become a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The link does not point at the repository host.
    NotHosted,
    /// Nothing meaningful was left after cleanup.
    DescriptionTooShort,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::NotHosted => f.write_str("link is not hosted on the repository host"),
            RejectReason::DescriptionTooShort => f.write_str("description too short"),
        }
    }
}

/// A bullet link that was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// 1-based line number in the document.
    pub line: usize,
    pub name: String,
    pub url: String,
    pub reason: RejectReason,
}

/// Outcome of scanning one document.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Accepted entries, in document order.
    pub candidates: Vec<Candidate>,
    /// Dropped entries, in document order.
    pub rejected: Vec<Rejected>,
}

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Matches `- [Name](url) rest-of-line` or `* [Name](url) rest-of-line`.
/// An optional link title (`[Name](url "title")`) is skipped.
static BULLET_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*[-*]\s+\[([^\]]+)\]\(([^)\s]+)(?:\s+"[^"]*")?\s*\)(.*)$"#)
        .expect("bullet link regex")
});

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Scan a markdown document for tool candidates.
#[instrument(skip(markdown), fields(bytes = markdown.len()))]
pub fn extract_candidates(markdown: &str, source_list: &str, category: Category) -> Extraction {
    let mut extraction = Extraction::default();

    for (idx, line) in markdown.lines().enumerate() {
        let Some(caps) = BULLET_LINK_RE.captures(line) else {
            continue;
        };

        let name = caps[1].trim().to_string();
        let url = caps[2].trim().to_string();

        if !url.to_lowercase().contains(REPO_HOST) {
            extraction.rejected.push(Rejected {
                line: idx + 1,
                name,
                url,
                reason: RejectReason::NotHosted,
            });
            continue;
        }

        let description = cleanup::clean_description(&caps[3]);
        if description.chars().count() < MIN_DESCRIPTION_CHARS {
            extraction.rejected.push(Rejected {
                line: idx + 1,
                name,
                url,
                reason: RejectReason::DescriptionTooShort,
            });
            continue;
        }

        extraction.candidates.push(Candidate {
            name,
            url,
            description: truncate_chars(&description, MAX_DESCRIPTION_CHARS).to_string(),
            source_list: source_list.to_string(),
            category,
        });
    }

    debug!(
        candidates = extraction.candidates.len(),
        rejected = extraction.rejected.len(),
        "extraction complete"
    );

    extraction
}
