//! Keyword tagging for tool descriptions.
//!
//! Tags come from three places, in this order: the category, up to
//! [`MAX_TOPICS`] repository topics, then every keyword group whose pattern
//! appears in the description. The result is cut to a cap by position, so the
//! category always survives.

use tooldb_shared::{Category, TagSet};

/// Tag cap for tools found by search queries.
pub const SEARCH_TAG_CAP: usize = 8;

/// Tag cap for tools scraped from curated lists.
pub const LIST_TAG_CAP: usize = 6;

/// Topics beyond this many are ignored.
pub const MAX_TOPICS: usize = 5;

/// Tag → substrings that trigger it. Scanned top to bottom.
const KEYWORDS: &[(&str, &[&str])] = &[
    ("cli", &["cli", "command-line", "terminal"]),
    ("mcp", &["mcp", "model context protocol"]),
    ("ai", &["ai", "llm", "gpt", "claude", "machine learning"]),
    ("git", &["git", "github", "version control"]),
    ("mac", &["mac", "macos", "osx"]),
    ("productivity", &["productivity", "workflow", "automation"]),
    ("documentation", &["documentation", "docs"]),
    ("api", &["api", "rest", "http"]),
    ("search", &["search", "find", "grep"]),
    ("testing", &["test", "testing"]),
    ("docker", &["docker", "container", "kubernetes"]),
];

/// Build the tag set for one tool.
pub fn generate_tags(description: &str, topics: &[String], category: Category, cap: usize) -> TagSet {
    let mut tags = TagSet::new();
    tags.insert(category.as_str());

    for topic in topics.iter().take(MAX_TOPICS) {
        tags.insert(topic.replace('-', " "));
    }

    let desc_lower = description.to_lowercase();
    for (tag, patterns) in KEYWORDS {
        if patterns.iter().any(|p| desc_lower.contains(*p)) {
            tags.insert(*tag);
        }
    }

    tags.truncate(cap);
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(description: &str, topics: &[&str], category: Category, cap: usize) -> Vec<String> {
        let topics: Vec<String> = topics.iter().map(|t| t.to_string()).collect();
        generate_tags(description, &topics, category, cap)
            .iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn multi_keyword_match() {
        let got = tags("A fast CLI tool for git automation", &[], Category::CliTool, SEARCH_TAG_CAP);
        assert_eq!(got, ["cli-tool", "cli", "git", "productivity"]);
    }

    #[test]
    fn category_comes_first_then_topics() {
        let got = tags(
            "Nothing special",
            &["developer-tools", "rust"],
            Category::DevTool,
            SEARCH_TAG_CAP,
        );
        assert_eq!(got, ["dev-tool", "developer tools", "rust"]);
    }

    #[test]
    fn only_first_five_topics_count() {
        let got = tags(
            "Nothing to match here",
            &["one", "two", "three", "four", "five", "six", "seven"],
            Category::MacApp,
            SEARCH_TAG_CAP,
        );
        assert_eq!(got, ["mac-app", "one", "two", "three", "four", "five"]);
    }

    #[test]
    fn cap_keeps_earliest_tags() {
        let description = "CLI for MCP and LLM with git, macOS workflow docs, REST API search and docker tests";
        let got = tags(description, &["a", "b", "c"], Category::AiTooling, SEARCH_TAG_CAP);
        assert_eq!(got.len(), SEARCH_TAG_CAP);
        assert_eq!(got, ["ai-tooling", "a", "b", "c", "cli", "mcp", "ai", "git"]);

        let got = tags(description, &[], Category::AiTooling, LIST_TAG_CAP);
        assert_eq!(got, ["ai-tooling", "cli", "mcp", "ai", "git", "mac"]);
    }

    #[test]
    fn duplicate_topic_and_keyword_collapse() {
        let got = tags("Git helper", &["git", "git"], Category::DevTool, SEARCH_TAG_CAP);
        assert_eq!(got, ["dev-tool", "git"]);
    }

    #[test]
    fn output_is_deterministic() {
        let a = tags("Terminal search for docs", &["cli"], Category::CliTool, SEARCH_TAG_CAP);
        let b = tags("Terminal search for docs", &["cli"], Category::CliTool, SEARCH_TAG_CAP);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_description_yields_category_only() {
        let got = tags("", &[], Category::McpServer, LIST_TAG_CAP);
        assert_eq!(got, ["mcp-server"]);
    }
}
