//! Text helpers for turning markdown lines into page text.

use regex::Regex;
use std::sync::OnceLock;

/// Strip inline markdown so body rows read as plain text.
///
/// Handles links and images (`[text](url)` keeps `text`), `**bold**`,
/// `__bold__`, `*italic*`, `_italic_` (leaving snake_case alone), `` `code` ``
/// and `~~strikethrough~~`.
///
/// # Examples
///
/// ```
/// # use sectionnav::parser::utils::strip_markdown_inline;
/// assert_eq!(strip_markdown_inline("**bold** text"), "bold text");
/// assert_eq!(strip_markdown_inline("see [the docs](https://x.y)"), "see the docs");
/// assert_eq!(strip_markdown_inline("snake_case_var"), "snake_case_var");
/// ```
pub fn strip_markdown_inline(text: &str) -> String {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            (r"!?\[([^\]]*)\]\([^)]*\)", "$1"),
            (r"~~(.+?)~~", "$1"),
            (r"\*\*(.+?)\*\*", "$1"),
            (r"__(.+?)__", "$1"),
            (r"`([^`]+)`", "$1"),
            (r"\*(.+?)\*", "$1"),
            (r"(^|[^a-zA-Z0-9])_([^_]+)_([^a-zA-Z0-9]|$)", "$1$2$3"),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| Some((Regex::new(pattern).ok()?, replacement)))
        .collect()
    });

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        result = pattern.replace_all(&result, *replacement).into_owned();
    }
    result
}

/// Split a trailing `{#anchor}` attribute off heading text.
///
/// Returns the remaining text and the anchor, if one was present.
///
/// ```
/// # use sectionnav::parser::utils::split_heading_attribute;
/// assert_eq!(split_heading_attribute("Intro {#start}"), ("Intro", Some("start")));
/// assert_eq!(split_heading_attribute("Intro"), ("Intro", None));
/// ```
pub fn split_heading_attribute(text: &str) -> (&str, Option<&str>) {
    static ATTRIBUTE: OnceLock<Option<Regex>> = OnceLock::new();
    let attribute = ATTRIBUTE
        .get_or_init(|| Regex::new(r"\s*\{#([A-Za-z0-9_:.\-]+)\}\s*$").ok())
        .as_ref();

    match attribute.and_then(|re| re.captures(text)) {
        Some(caps) => {
            let whole = caps.get(0).map_or(text.len(), |m| m.start());
            (text[..whole].trim_end(), caps.get(1).map(|m| m.as_str()))
        }
        None => (text.trim_end(), None),
    }
}

/// True for a setext underline (`===` or `---`).
pub fn is_setext_underline(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && (trimmed.chars().all(|c| c == '=') || trimmed.chars().all(|c| c == '-'))
}

/// Drop leading and trailing blank lines.
pub fn trim_blank_lines(lines: &[String]) -> &[String] {
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |i| i + 1);
    &lines[start..end]
}
