//! Description cleanup for scraped list entries.
//!
//! Each pass is a function `&str -> String` applied in sequence. The result is
//! plain single-line prose with badges, images and separator punctuation gone.

use std::sync::LazyLock;

use regex::Regex;

/// Characters trimmed from both ends of a description.
const EDGE_PUNCTUATION: &[char] = &['-', '–', '—', ':', '.', ',', ';', '|', '*', '_'];

/// Run the full cleanup pipeline on the text that follows a list link.
pub(crate) fn clean_description(raw: &str) -> String {
    let mut result = strip_linked_badges(raw);
    result = strip_images(&result);
    result = strip_html_images(&result);
    result = collapse_whitespace(&result);
    trim_edge_punctuation(&result).to_string()
}

// ---------------------------------------------------------------------------
// Pass 1: Linked badges
// ---------------------------------------------------------------------------

/// Remove `[![alt](img)](target)` badge links.
fn strip_linked_badges(text: &str) -> String {
    static BADGE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\[!\[[^\]]*\]\([^)]*\)\]\([^)]*\)").expect("valid regex")
    });

    BADGE_RE.replace_all(text, "").to_string()
}

// ---------------------------------------------------------------------------
// Pass 2: Inline images
// ---------------------------------------------------------------------------

/// Remove `![alt](src)` image markup.
fn strip_images(text: &str) -> String {
    static IMAGE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("valid regex"));

    IMAGE_RE.replace_all(text, "").to_string()
}

// ---------------------------------------------------------------------------
// Pass 3: HTML images
// ---------------------------------------------------------------------------

/// Remove raw `<img ...>` tags some lists use for badges and logos.
fn strip_html_images(text: &str) -> String {
    static IMG_TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("valid regex"));

    IMG_TAG_RE.replace_all(text, "").to_string()
}

// ---------------------------------------------------------------------------
// Pass 4: Whitespace and edges
// ---------------------------------------------------------------------------

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn trim_edge_punctuation(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || EDGE_PUNCTUATION.contains(&c))
}
