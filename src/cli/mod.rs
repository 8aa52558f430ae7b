//! Command-line interface module.

mod args;
pub mod build;
pub mod paths;
pub mod render;
pub mod serve;

pub use args::{Cli, Commands};

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::FsContentStore;
use crate::og::{OgHandler, OgRenderer};

/// Handler wired to the configured content directory, fallback and cache policy.
pub fn og_handler(config: &SiteConfig) -> OgHandler {
    let store = Arc::new(FsContentStore::new(&config.paths.content));
    let renderer = Arc::new(OgRenderer::from_config(config));
    OgHandler::new(store, renderer)
        .with_fallback(config.site.fallback_image.clone())
        .with_cache_control(config.serve.cache.header_value())
}
