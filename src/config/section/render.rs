//! `[render]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [render]
//! lowercase = true
//! title_font = "Noto Sans SC, Inter, sans-serif"
//! meta_font = "Inter, -apple-system, BlinkMacSystemFont, Segoe UI, Roboto, sans-serif"
//!
//! [render.fonts]
//! files = ["public/fonts/NotoSansSC.otf"]
//! system = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::ConfigDiagnostics;
use crate::og::{Branding, FontConfig};
use crate::utils::path::resolve_config_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Lowercase titles before layout.
    pub lowercase: bool,
    pub title_font: String,
    pub meta_font: String,
    pub fonts: FontConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let branding = Branding::default();
        Self {
            lowercase: true,
            title_font: branding.title_font,
            meta_font: branding.meta_font,
            fonts: FontConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Resolve font paths against the project root (with `~` expansion).
    pub fn normalize(&mut self, root: &Path) {
        for path in self.fonts.files.iter_mut().chain(self.fonts.dirs.iter_mut()) {
            *path = resolve_config_path(path, root);
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(self.fonts.default_size.is_finite() && self.fonts.default_size > 0.0) {
            diag.error(
                "render.fonts.default_size",
                format!("must be a positive number, got {}", self.fonts.default_size),
            );
        }
        if self.fonts.default_family.trim().is_empty() {
            diag.error_with_hint(
                "render.fonts.default_family",
                "must not be empty",
                "e.g. \"Inter\"",
            );
        }
        if self.title_font.trim().is_empty() {
            diag.error("render.title_font", "must not be empty");
        }
        if self.meta_font.trim().is_empty() {
            diag.error("render.meta_font", "must not be empty");
        }
    }
}
