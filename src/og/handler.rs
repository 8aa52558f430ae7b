//! Image endpoint logic, independent of the HTTP server.
//!
//! Every failure becomes a redirect to the static fallback image; callers
//! never see a broken image or an error page.

use std::sync::Arc;

use thiserror::Error;

use super::route::RouteError;
use super::{OgRenderer, OgRoute, RenderError, RenderRequest};
use crate::content::ContentStore;
use crate::log;
use crate::utils::hash;

pub const DEFAULT_FALLBACK_IMAGE: &str = "/images/ogimage.png";
pub const DEFAULT_CACHE_CONTROL: &str = "public, max-age=86400, s-maxage=604800";

/// Why an image could not be produced.
#[derive(Debug, Error)]
pub enum OgError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("no post `{slug}` in {collection}")]
    PostNotFound { collection: &'static str, slug: String },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Outcome of an image request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OgResponse {
    /// 200 with `image/png`.
    Png {
        body: Vec<u8>,
        etag: String,
        cache_control: String,
    },
    /// 304; the client's copy is current.
    NotModified { etag: String, cache_control: String },
    /// 302 to the static fallback image.
    Redirect { location: String },
}

impl OgResponse {
    pub const fn status(&self) -> u16 {
        match self {
            Self::Png { .. } => 200,
            Self::NotModified { .. } => 304,
            Self::Redirect { .. } => 302,
        }
    }
}

/// Resolves image routes against a content store and renders them.
pub struct OgHandler {
    store: Arc<dyn ContentStore>,
    renderer: Arc<OgRenderer>,
    fallback: String,
    cache_control: String,
}

impl OgHandler {
    pub fn new(store: Arc<dyn ContentStore>, renderer: Arc<OgRenderer>) -> Self {
        Self {
            store,
            renderer,
            fallback: DEFAULT_FALLBACK_IMAGE.to_string(),
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
        }
    }

    pub fn with_fallback(mut self, location: impl Into<String>) -> Self {
        self.fallback = location.into();
        self
    }

    pub fn with_cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = value.into();
        self
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Load fonts ahead of the first request.
    pub fn init(&self) -> Result<(), RenderError> {
        self.renderer.init()
    }

    /// Handle a request URL, honoring `If-None-Match`.
    pub fn handle(&self, url: &str, if_none_match: Option<&str>) -> OgResponse {
        match self.render_url(url) {
            Ok(body) => {
                let etag = hash::etag(&body);
                let cache_control = self.cache_control.clone();
                if if_none_match.is_some_and(|value| hash::etag_matches(value, &etag)) {
                    OgResponse::NotModified {
                        etag,
                        cache_control,
                    }
                } else {
                    OgResponse::Png {
                        body,
                        etag,
                        cache_control,
                    }
                }
            }
            Err(e) => {
                log!("og"; "{}: {}, serving fallback", url, e);
                OgResponse::Redirect {
                    location: self.fallback.clone(),
                }
            }
        }
    }

    pub fn render_url(&self, url: &str) -> Result<Vec<u8>, OgError> {
        let request = self.resolve_url(url)?;
        Ok(self.renderer.render(&request)?)
    }

    /// Resolve the first reading of `url` that names an existing post.
    pub fn resolve_url(&self, url: &str) -> Result<RenderRequest, OgError> {
        let mut first_error = None;

        for route in OgRoute::parse_candidates(url)? {
            match self.resolve(&route) {
                Ok(request) => return Ok(request),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(first_error.unwrap_or(OgError::Route(RouteError::EmptySlug)))
    }

    pub fn render_route(&self, route: &OgRoute) -> Result<Vec<u8>, OgError> {
        let request = self.resolve(route)?;
        Ok(self.renderer.render(&request)?)
    }

    /// Look up the post title for a route.
    pub fn resolve(&self, route: &OgRoute) -> Result<RenderRequest, OgError> {
        let collection = route.section.collection();
        let post = self
            .store
            .find_post(collection, &route.slug)
            .ok_or_else(|| OgError::PostNotFound {
                collection,
                slug: route.slug.clone(),
            })?;

        Ok(RenderRequest::new(post.title, route.section, route.theme))
    }

    /// Every pre-renderable image route, both themes per post.
    pub fn routes(&self) -> Vec<OgRoute> {
        super::Section::ALL
            .into_iter()
            .flat_map(|section| {
                self.store
                    .posts_in_section(section.collection())
                    .into_iter()
                    .flat_map(move |post| {
                        super::Theme::ALL
                            .into_iter()
                            .map(move |theme| OgRoute::new(section, post.slug.clone(), theme))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryStore;
    use crate::og::tests::{PNG_MAGIC, offline_renderer};
    use crate::og::{Section, Theme};

    fn handler() -> OgHandler {
        let store = MemoryStore::new()
            .with_post("writing", "hello-world", "Hello World")
            .with_post("writing", "2024/nested", "Nested <post> & more")
            .with_post("thought", "idea", "A passing idea");
        OgHandler::new(Arc::new(store), Arc::new(offline_renderer()))
    }

    fn fallback() -> OgResponse {
        OgResponse::Redirect {
            location: "/images/ogimage.png".into(),
        }
    }

    #[test]
    fn test_known_slug_renders_png() {
        let response = handler().handle("/og/writings/hello-world-dark.png", None);
        let OgResponse::Png {
            body,
            etag,
            cache_control,
        } = response
        else {
            panic!("expected png, got {response:?}");
        };
        assert!(body.starts_with(PNG_MAGIC));
        assert_eq!(etag, hash::etag(&body));
        assert_eq!(cache_control, "public, max-age=86400, s-maxage=604800");
    }

    #[test]
    fn test_light_and_nested() {
        let handler = handler();
        assert_eq!(handler.handle("/og/writings/2024/nested-light.png", None).status(), 200);
        assert_eq!(handler.handle("/og/thoughts/idea.png", None).status(), 200);
    }

    #[test]
    fn test_unknown_slug_redirects() {
        assert_eq!(handler().handle("/og/writings/missing.png", None), fallback());
    }

    #[test]
    fn test_unknown_section_redirects() {
        assert_eq!(handler().handle("/og/notes/hello-world.png", None), fallback());
        // Slug exists, but in the other section.
        assert_eq!(handler().handle("/og/thoughts/hello-world.png", None), fallback());
    }

    #[test]
    fn test_malformed_path_redirects() {
        assert_eq!(handler().handle("/og/writings/hello-world.jpg", None), fallback());
        assert_eq!(handler().handle("/og/", None), fallback());
    }

    #[test]
    fn test_empty_title_redirects() {
        let store = MemoryStore::new().with_post("writing", "blank", "  ");
        let handler = OgHandler::new(Arc::new(store), Arc::new(offline_renderer()));
        assert_eq!(handler.handle("/og/writings/blank.png", None), fallback());
    }

    #[test]
    fn test_custom_fallback() {
        let handler = handler().with_fallback("/og-default.png");
        assert_eq!(
            handler.handle("/og/writings/missing.png", None),
            OgResponse::Redirect {
                location: "/og-default.png".into()
            }
        );
    }

    #[test]
    fn test_if_none_match() {
        let handler = handler();
        let OgResponse::Png { etag, .. } = handler.handle("/og/thoughts/idea.png", None) else {
            panic!("expected png");
        };

        let again = handler.handle("/og/thoughts/idea.png", Some(&etag));
        assert_eq!(again.status(), 304);

        let stale = handler.handle("/og/thoughts/idea.png", Some("\"0000\""));
        assert_eq!(stale.status(), 200);
    }

    #[test]
    fn test_resolve_error_kinds() {
        let handler = handler();
        let missing = OgRoute::new(Section::Thought, "nope", Theme::Dark);
        assert!(matches!(
            handler.resolve(&missing),
            Err(OgError::PostNotFound { collection: "thought", .. })
        ));
        assert!(matches!(
            handler.render_url("/og/x/y.png"),
            Err(OgError::Route(RouteError::UnknownSection(_)))
        ));
    }

    #[test]
    fn test_routes_cover_both_themes() {
        let routes = handler().routes();
        assert_eq!(routes.len(), 6);
        let paths: Vec<_> = routes.iter().map(OgRoute::path).collect();
        assert!(paths.contains(&"/og/writings/hello-world.png".to_string()));
        assert!(paths.contains(&"/og/writings/hello-world-light.png".to_string()));
        assert!(paths.contains(&"/og/thoughts/idea-light.png".to_string()));
    }

    #[test]
    fn test_slugs_ending_in_theme_names() {
        let store = MemoryStore::new()
            .with_post("writing", "into-the-dark", "Into the Dark")
            .with_post("thought", "see-the-light", "See the Light");
        let handler = OgHandler::new(Arc::new(store), Arc::new(offline_renderer()));

        assert_eq!(handler.handle("/og/writings/into-the-dark.png", None).status(), 200);
        assert_eq!(handler.handle("/og/writings/into-the-dark-light.png", None).status(), 200);
        assert_eq!(handler.handle("/og/thoughts/see-the-light.png", None).status(), 200);
        assert_eq!(handler.handle("/og/thoughts/see-the-light-light.png", None).status(), 200);

        let request = handler.resolve_url("/og/thoughts/see-the-light.png").unwrap();
        assert_eq!(request.title, "See the Light");
        assert_eq!(request.theme, Theme::Dark);
        let request = handler.resolve_url("/og/thoughts/see-the-light-light.png").unwrap();
        assert_eq!(request.theme, Theme::Light);
    }

    #[test]
    fn test_every_advertised_route_renders() {
        let store = MemoryStore::new()
            .with_post("writing", "into-the-dark", "Into the Dark")
            .with_post("writing", "plain", "Plain")
            .with_post("thought", "see-the-light", "See the Light");
        let handler = OgHandler::new(Arc::new(store), Arc::new(offline_renderer()));

        for route in handler.routes() {
            let path = route.path();
            assert_eq!(handler.handle(&path, None).status(), 200, "{path}");
        }
    }
}
