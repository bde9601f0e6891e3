//! Comma-separated tag text parsing and serialization
//!
//! Sidecar caption files hold a single line of comma-separated tags:
//! `tag1, tag2, tag3`. Parsing trims whitespace around each piece and drops
//! empty pieces; order is preserved.

/// Parse comma-separated tag text into an ordered tag list.
///
/// Whitespace around each tag is trimmed; empty pieces (including pieces
/// that were only whitespace) are dropped.
#[must_use]
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Serialize a tag list as comma-separated text.
///
/// With `trailing_comma` a trailing `,` is appended when the list is
/// non-empty. This is the editing-display form; files on disk are written
/// without it.
#[must_use]
pub fn join_tags(tags: &[String], trailing_comma: bool) -> String {
    let joined = tags.join(", ");
    if trailing_comma && !tags.is_empty() {
        joined + ","
    } else {
        joined
    }
}
