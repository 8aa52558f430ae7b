//! Frontmatter extraction from YAML-like (`---`) or TOML (`+++`) blocks.
//!
//! Only the fields the image routes need are read; everything else is ignored.

use anyhow::{Result, anyhow};
use serde::Deserialize;

/// Post fields read from frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostMeta {
    pub title: Option<String>,
    /// Overrides the path-derived slug.
    pub slug: Option<String>,
    pub draft: bool,
}

/// Extract metadata from the head of a content file.
///
/// Returns `Ok(None)` when the file has no frontmatter block.
pub fn extract(content: &str) -> Result<Option<PostMeta>> {
    match detect(content) {
        Some((block, true)) => parse_toml(block).map(Some),
        Some((block, false)) => Ok(Some(parse_yaml_like(block))),
        None => Ok(None),
    }
}

/// Returns `(block, is_toml)`.
fn detect(content: &str) -> Option<(&str, bool)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if let Some(rest) = trimmed.strip_prefix(fence)
            && let Some(end) = rest.find(&format!("\n{fence}"))
        {
            return Some((rest[..end].trim(), is_toml));
        }
    }
    None
}

/// `key: value` lines; quoted values are unquoted.
fn parse_yaml_like(block: &str) -> PostMeta {
    let mut meta = PostMeta::default();

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = unquote(value.trim());

        match key.trim().to_ascii_lowercase().as_str() {
            "title" => meta.title = Some(value.to_string()),
            "slug" => meta.slug = Some(value.to_string()),
            "draft" => meta.draft = value.eq_ignore_ascii_case("true"),
            _ => {}
        }
    }

    meta
}

fn parse_toml(block: &str) -> Result<PostMeta> {
    toml::from_str(block).map_err(|e| anyhow!("invalid TOML frontmatter: {e}"))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
