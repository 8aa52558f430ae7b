//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! content = "content"   # <content>/<collection>/**/*.md
//! public = "public"     # static files, including the fallback image
//! output = "dist"       # pre-rendered images from `ogcard build`
//! ```
//!
//! Relative paths are resolved against the directory of `ogcard.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::path::resolve_config_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub content: PathBuf,
    pub public: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            public: "public".into(),
            output: "dist".into(),
        }
    }
}

impl PathsConfig {
    pub fn normalize(&mut self, root: &Path) {
        self.content = resolve_config_path(&self.content, root);
        self.public = resolve_config_path(&self.public, root);
        self.output = resolve_config_path(&self.output, root);
    }
}
