//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! author = "Jesse Lin"
//! identity = "数字生命"                   # middle part of the byline
//! url = "https://them.selv.es"            # footer shows the host
//! domain = "them.selv.es"                 # optional, overrides the host
//! fallback_image = "/images/ogimage.png"  # redirect target on any failure
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::og::handler::DEFAULT_FALLBACK_IMAGE;

/// Site identity printed on images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    pub author: String,
    pub identity: String,
    pub url: Option<String>,
    pub domain: Option<String>,
    pub fallback_image: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            author: "Jesse Lin".into(),
            identity: "数字生命".into(),
            url: Some("https://them.selv.es".into()),
            domain: None,
            fallback_image: DEFAULT_FALLBACK_IMAGE.into(),
        }
    }
}

impl SiteSectionConfig {
    /// Footer text: explicit `domain`, else the host of `url`.
    pub fn display_domain(&self) -> String {
        if let Some(domain) = &self.domain {
            return domain.clone();
        }
        self.url
            .as_deref()
            .and_then(|u| url::Url::parse(u).ok())
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default()
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(url_str) = &self.url {
            match url::Url::parse(url_str) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        diag.error_with_hint(
                            "site.url",
                            format!(
                                "scheme '{}' not supported, must be http or https",
                                parsed.scheme()
                            ),
                            "use format like https://example.com",
                        );
                    }
                    if parsed.host_str().is_none() {
                        diag.error_with_hint(
                            "site.url",
                            "URL must have a valid host",
                            "use format like https://example.com",
                        );
                    }
                }
                Err(e) => {
                    diag.error_with_hint(
                        "site.url",
                        format!("invalid URL: {e}"),
                        "use format like https://example.com",
                    );
                }
            }
        }

        let fallback = &self.fallback_image;
        let is_absolute_url = url::Url::parse(fallback).is_ok();
        if !fallback.starts_with('/') && !is_absolute_url {
            diag.error_with_hint(
                "site.fallback_image",
                format!("'{fallback}' is neither a site path nor a URL"),
                "use a path like /images/ogimage.png",
            );
        }
    }
}
