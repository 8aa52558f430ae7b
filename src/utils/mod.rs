//! Small shared helpers.
//!
//! - [`xml`]: escaping for SVG text and attributes
//! - [`mime`]: content types for served files
//! - [`hash`]: blake3 digests for ETags
//! - [`path`]: filesystem path normalization

pub mod hash;
pub mod mime;
pub mod path;
pub mod xml;

/// Format count with noun, handling pluralization
///
/// - `plural_count(1, "image")` -> `"1 image"`
/// - `plural_count(3, "image")` -> `"3 images"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
