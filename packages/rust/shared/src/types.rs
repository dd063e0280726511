//! Core domain types for the tool database.

use serde::{Deserialize, Serialize};

use crate::error::ToolDbError;

/// Descriptions longer than this many characters are cut.
pub const MAX_DESCRIPTION_CHARS: usize = 300;

/// Descriptions shorter than this many characters are not worth keeping.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Host of the repository service every tool must live on.
pub const REPO_HOST: &str = "github.com";

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The fixed set of labels a query or source list assigns to its tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    McpServer,
    CliTool,
    MacApp,
    AiTooling,
    DevTool,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::McpServer,
        Category::CliTool,
        Category::MacApp,
        Category::AiTooling,
        Category::DevTool,
    ];

    /// The kebab-case label used in output and as a tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::McpServer => "mcp-server",
            Category::CliTool => "cli-tool",
            Category::MacApp => "mac-app",
            Category::AiTooling => "ai-tooling",
            Category::DevTool => "dev-tool",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ToolDbError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ToolDbError::validation(format!("unknown category '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// TagSet
// ---------------------------------------------------------------------------

/// An insertion-ordered set of tags.
///
/// Iteration order is the order tags were first inserted, so tag output is
/// identical from run to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag unless it is already present. Returns `true` if added.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep only the first `cap` tags.
    pub fn truncate(&mut self, cap: usize) {
        self.0.truncate(cap);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tool
// ---------------------------------------------------------------------------

/// A discovered developer tool, as written to the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Short repository name.
    pub name: String,
    /// Description, at most [`MAX_DESCRIPTION_CHARS`] characters.
    pub description: String,
    /// Canonical repository web URL.
    pub url: String,
    /// Star count at the time of the run.
    pub stars: u64,
    /// Category assigned by the query or source list that found the tool.
    pub category: Category,
    /// Derived tags; always contains the category label.
    pub tags: TagSet,
    /// `owner/repo` of the curated list this tool came from (list pipeline only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_list: Option<String>,
}

impl Tool {
    /// Build a tool, cutting the description down to [`MAX_DESCRIPTION_CHARS`].
    pub fn new(
        name: impl Into<String>,
        description: &str,
        url: impl Into<String>,
        stars: u64,
        category: Category,
        tags: TagSet,
    ) -> Self {
        Self {
            name: name.into(),
            description: truncate_chars(description, MAX_DESCRIPTION_CHARS).to_string(),
            url: url.into(),
            stars,
            category,
            tags,
            source_list: None,
        }
    }

    /// Attach the curated list identifier this tool was scraped from.
    pub fn with_source_list(mut self, source_list: impl Into<String>) -> Self {
        self.source_list = Some(source_list.into());
        self
    }
}

/// Return the prefix of `s` holding at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
