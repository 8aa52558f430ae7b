//! Slugs derived from content file paths.

use std::path::{Component, Path};

/// Slug for a content file relative to its collection directory.
///
/// `2024/My Post.md` → `2024/my-post`, `guide/index.md` → `guide`.
pub fn slug_from_path(relative: &Path) -> String {
    let stem = relative.with_extension("");
    let mut segments: Vec<String> = stem
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(slugify_segment(&s.to_string_lossy())),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }
    segments.join("/")
}

/// Lowercase, whitespace runs to `-`, drop URL-unsafe punctuation.
///
/// Non-ASCII letters are kept so CJK filenames stay readable.
pub fn slugify_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut pending_dash = false;

    for c in segment.chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = !out.is_empty();
        } else if c.is_alphanumeric() {
            if pending_dash {
                out.push('-');
                pending_dash = false;
            }
            out.extend(c.to_lowercase());
        }
    }
    out
}
