//! Open Graph preview images.
//!
//! # Pipeline
//!
//! ```text
//! (title, section, theme)
//!         │
//!         ▼
//!    ┌────────┐
//!    │ layout │ ──► truncate, font tier, wrap, center
//!    └───┬────┘
//!        ▼
//!    ┌─────────┐
//!    │ compose │ ──► escaped SVG document (1200×630)
//!    └───┬─────┘
//!        ▼
//!    ┌────────┐
//!    │ raster │ ──► resvg → PNG bytes
//!    └────────┘
//! ```
//!
//! [`handler`] wraps the pipeline for HTTP: route parsing, content lookup and
//! fallback redirects.

mod compose;
mod error;
pub mod handler;
pub mod layout;
mod raster;
pub mod route;
mod section;
mod theme;

pub use compose::{Branding, compose_document};
pub use error::RenderError;
pub use handler::{OgError, OgHandler, OgResponse};
pub use layout::Layout;
pub use raster::{FontConfig, Rasterizer};
pub use route::OgRoute;
pub use section::Section;
pub use theme::{SectionTheme, Theme};

use crate::config::SiteConfig;

/// One image to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub title: String,
    pub section: Section,
    pub theme: Theme,
}

impl RenderRequest {
    pub fn new(title: impl Into<String>, section: Section, theme: Theme) -> Self {
        Self {
            title: title.into(),
            section,
            theme,
        }
    }
}

/// Layout + composition + rasterization, with the site's branding.
///
/// Owns the [`Rasterizer`] and with it the one-time font setup; share it
/// behind an `Arc`.
pub struct OgRenderer {
    rasterizer: Rasterizer,
    branding: Branding,
    lowercase: bool,
}

impl OgRenderer {
    pub fn new(rasterizer: Rasterizer, branding: Branding) -> Self {
        Self {
            rasterizer,
            branding,
            lowercase: false,
        }
    }

    /// Lowercase titles before layout.
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            Rasterizer::new(config.render.fonts.clone()),
            config.branding(),
        )
        .with_lowercase(config.render.lowercase)
    }

    /// Eagerly run the rasterizer's one-time setup.
    pub fn init(&self) -> Result<(), RenderError> {
        self.rasterizer.init()
    }

    pub fn layout(&self, title: &str) -> Layout {
        if self.lowercase {
            Layout::compute_lowercase(title)
        } else {
            Layout::compute(title)
        }
    }

    /// The SVG document for a request.
    pub fn document(&self, request: &RenderRequest) -> Result<String, RenderError> {
        if request.title.trim().is_empty() {
            return Err(RenderError::EmptyTitle);
        }

        let layout = self.layout(&request.title);
        let colors = SectionTheme::resolve(request.section, request.theme);
        Ok(compose_document(
            &layout,
            &colors,
            &self.branding,
            request.section.collection(),
        )?)
    }

    /// PNG bytes for a request.
    pub fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, RenderError> {
        let svg = self.document(request)?;
        self.rasterizer.rasterize(&svg)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    /// Renderer without host fonts: deterministic across machines.
    pub fn offline_renderer() -> OgRenderer {
        let fonts = FontConfig {
            system: false,
            ..FontConfig::default()
        };
        OgRenderer::new(Rasterizer::new(fonts), Branding::default()).with_lowercase(true)
    }

    #[test]
    fn test_render_png() {
        let renderer = offline_renderer();
        let request = RenderRequest::new("Hello World", Section::Writing, Theme::Dark);
        let png = renderer.render(&request).unwrap();
        assert!(png.starts_with(PNG_MAGIC));
    }

    #[test]
    fn test_render_is_byte_identical() {
        let renderer = offline_renderer();
        let request = RenderRequest::new("Same title twice", Section::Thought, Theme::Light);
        assert_eq!(
            renderer.render(&request).unwrap(),
            renderer.render(&request).unwrap()
        );
    }

    #[test]
    fn test_themes_differ() {
        let renderer = offline_renderer();
        let dark = RenderRequest::new("Themes", Section::Writing, Theme::Dark);
        let light = RenderRequest::new("Themes", Section::Writing, Theme::Light);
        assert_ne!(renderer.render(&dark).unwrap(), renderer.render(&light).unwrap());
    }

    #[test]
    fn test_empty_title_rejected() {
        let renderer = offline_renderer();
        let request = RenderRequest::new("   ", Section::Writing, Theme::Dark);
        assert!(matches!(renderer.render(&request), Err(RenderError::EmptyTitle)));
    }

    #[test]
    fn test_lowercase_applies_to_layout() {
        let renderer = offline_renderer();
        assert_eq!(renderer.layout("Hello World").lines, vec!["hello world"]);

        let keep = OgRenderer::new(Rasterizer::new(FontConfig::default()), Branding::default());
        assert_eq!(keep.layout("Hello World").lines, vec!["Hello World"]);
    }

    #[test]
    fn test_lowercase_keeps_tier_of_original_title() {
        // `İ` lowercases to two chars; the tier must follow the title as written.
        let title = "İ".repeat(25);
        let layout = offline_renderer().layout(&title);
        assert_eq!(layout.font_size, 64);
        assert_eq!(layout.display_title, title);
        assert_eq!(layout.lines, vec![title.to_lowercase()]);
    }

    #[test]
    fn test_document_escapes_title() {
        let renderer = offline_renderer();
        let request = RenderRequest::new("a < b & \"c\"", Section::Writing, Theme::Dark);
        let svg = renderer.document(&request).unwrap();
        assert!(svg.contains("a &lt; b &amp; &quot;c&quot;"));
    }
}
