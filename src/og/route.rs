//! `/og/{section}/{slug}[-{theme}].png` paths.

use std::fmt;

use percent_encoding::percent_decode_str;
use thiserror::Error;

use super::{Section, Theme};

/// URL prefix of generated images.
pub const OG_PREFIX: &str = "/og/";

/// Why a path is not a renderable image route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("not an image route")]
    NotOgPath,
    #[error("unknown section `{0}`")]
    UnknownSection(String),
    #[error("missing .png extension")]
    NotPng,
    #[error("empty slug")]
    EmptySlug,
}

/// A parsed image request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OgRoute {
    pub section: Section,
    /// Post slug; may contain `/` for nested posts.
    pub slug: String,
    pub theme: Theme,
}

impl OgRoute {
    pub fn new(section: Section, slug: impl Into<String>, theme: Theme) -> Self {
        Self {
            section,
            slug: slug.into(),
            theme,
        }
    }

    /// Parse a request URL (query string ignored, percent-decoded).
    ///
    /// A trailing `-light` or `-dark` before `.png` selects the theme;
    /// without it the image is dark.
    pub fn parse(url: &str) -> Result<Self, RouteError> {
        let (section, stem) = split_url(url)?;
        let (slug, theme) = split_theme(&stem);
        let slug = slug.trim_matches('/');
        if slug.is_empty() {
            return Err(RouteError::EmptySlug);
        }

        Ok(Self::new(section, slug, theme))
    }

    /// Every reading of a request URL, most specific first.
    ///
    /// A slug may itself end in `-dark` or `-light` (`into-the-dark`), so a
    /// themed reading is followed by the whole stem as a dark image.
    pub fn parse_candidates(url: &str) -> Result<Vec<Self>, RouteError> {
        let themed = Self::parse(url)?;
        let (section, stem) = split_url(url)?;
        let stem = stem.trim_matches('/');

        let mut candidates = vec![themed];
        if candidates[0].slug != stem {
            candidates.push(Self::new(section, stem, Theme::Dark));
        }
        Ok(candidates)
    }

    /// URL path of this image.
    pub fn path(&self) -> String {
        format!(
            "{OG_PREFIX}{}/{}{}.png",
            self.section.route(),
            self.slug,
            self.theme.file_suffix()
        )
    }
}

impl fmt::Display for OgRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Section and file stem (slug plus optional theme suffix) of a URL.
fn split_url(url: &str) -> Result<(Section, String), RouteError> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8_lossy();

    let rest = decoded
        .strip_prefix(OG_PREFIX)
        .ok_or(RouteError::NotOgPath)?;
    let (section, file) = rest.split_once('/').ok_or(RouteError::NotOgPath)?;
    let section = Section::from_route(section)
        .ok_or_else(|| RouteError::UnknownSection(section.to_string()))?;

    let stem = file.strip_suffix(".png").ok_or(RouteError::NotPng)?;
    Ok((section, stem.to_string()))
}

fn split_theme(stem: &str) -> (&str, Theme) {
    for theme in Theme::ALL {
        if let Some(slug) = stem.strip_suffix(&format!("-{}", theme.as_str())) {
            return (slug, theme);
        }
    }
    (stem, Theme::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dark_default() {
        let route = OgRoute::parse("/og/writings/hello-world.png").unwrap();
        assert_eq!(route, OgRoute::new(Section::Writing, "hello-world", Theme::Dark));
    }

    #[test]
    fn test_parse_theme_suffix() {
        let light = OgRoute::parse("/og/thoughts/on-time-light.png").unwrap();
        assert_eq!(light.theme, Theme::Light);
        assert_eq!(light.slug, "on-time");

        let dark = OgRoute::parse("/og/thoughts/on-time-dark.png").unwrap();
        assert_eq!(dark.theme, Theme::Dark);
        assert_eq!(dark.slug, "on-time");
    }

    #[test]
    fn test_parse_nested_slug_and_query() {
        let route = OgRoute::parse("/og/writings/2024/first-post.png?v=3").unwrap();
        assert_eq!(route.slug, "2024/first-post");
    }

    #[test]
    fn test_parse_percent_encoded() {
        let route = OgRoute::parse("/og/writings/%E6%95%B0%E5%AD%97.png").unwrap();
        assert_eq!(route.slug, "数字");
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(OgRoute::parse("/images/ogimage.png"), Err(RouteError::NotOgPath));
        assert_eq!(OgRoute::parse("/og/writings"), Err(RouteError::NotOgPath));
        assert_eq!(
            OgRoute::parse("/og/notes/a.png"),
            Err(RouteError::UnknownSection("notes".into()))
        );
        assert_eq!(OgRoute::parse("/og/writings/a.jpg"), Err(RouteError::NotPng));
        assert_eq!(OgRoute::parse("/og/writings/.png"), Err(RouteError::EmptySlug));
        assert_eq!(OgRoute::parse("/og/writings/-light.png"), Err(RouteError::EmptySlug));
    }

    #[test]
    fn test_path_roundtrip() {
        let route = OgRoute::new(Section::Thought, "a/b", Theme::Light);
        assert_eq!(route.path(), "/og/thoughts/a/b-light.png");
        assert_eq!(OgRoute::parse(&route.path()).unwrap(), route);
        assert_eq!(
            OgRoute::new(Section::Writing, "x", Theme::Dark).to_string(),
            "/og/writings/x.png"
        );
    }

    #[test]
    fn test_candidates_for_theme_like_slugs() {
        let candidates = OgRoute::parse_candidates("/og/writings/into-the-dark.png").unwrap();
        assert_eq!(
            candidates,
            vec![
                OgRoute::new(Section::Writing, "into-the", Theme::Dark),
                OgRoute::new(Section::Writing, "into-the-dark", Theme::Dark),
            ]
        );

        let candidates = OgRoute::parse_candidates("/og/thoughts/see-the-light.png").unwrap();
        assert_eq!(candidates[1], OgRoute::new(Section::Thought, "see-the-light", Theme::Dark));

        let plain = OgRoute::parse_candidates("/og/writings/hello.png").unwrap();
        assert_eq!(plain, vec![OgRoute::new(Section::Writing, "hello", Theme::Dark)]);
    }
}
