use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// HTML comments, including ones spanning several lines.
    static ref HTML_COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid");

    /// An opening script tag (with or without attributes) through the nearest closing tag.
    static ref SCRIPT_TAG: Regex =
        Regex::new(r"(?is)<script(?:\s+[^>]*)?>.*?</script\s*>").expect("script pattern is valid");
}

/// Extracts every `<script>...</script>` substring from `html`, in document order.
///
/// Comments are removed first so commented-out scripts never match. The
/// matched substrings are returned verbatim, duplicates included.
pub fn extract_scripts(html: &str) -> Vec<String> {
    let without_comments = HTML_COMMENT.replace_all(html, "");
    SCRIPT_TAG
        .find_iter(&without_comments)
        .map(|m| m.as_str().to_string())
        .collect()
}
