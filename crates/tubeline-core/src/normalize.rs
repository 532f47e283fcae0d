use std::sync::LazyLock;

use regex::Regex;

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").unwrap());
static PARENTHESIZED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean raw caption text.
///
/// Collapses whitespace, then drops `[Music]`-style annotations and
/// parenthetical notes. Each span ends at the nearest closer; an opener with no
/// closer anywhere after it is left in place.
pub fn normalize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let cleaned = collapse_whitespace(raw);
    let cleaned = BRACKETED.replace_all(&cleaned, "");
    let cleaned = PARENTHESIZED.replace_all(&cleaned, "");

    // Removed spans leave doubled spaces behind
    collapse_whitespace(&cleaned)
}

pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}
