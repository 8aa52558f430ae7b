//! `[serve]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 4321                 # HTTP port number
//!
//! [serve.cache]
//! max_age = 86400             # browser cache, seconds
//! s_maxage = 604800           # shared (CDN) cache, seconds
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server accessible from LAN.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

/// Image server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub interface: IpAddr,
    pub port: u16,
    pub cache: CacheConfig,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 4321,
            cache: CacheConfig::default(),
        }
    }
}

/// `Cache-Control` lifetimes for generated images.
///
/// Edge caches keep images longer than browsers; a CDN purge invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_age: u32,
    pub s_maxage: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age: 86_400,
            s_maxage: 604_800,
        }
    }
}

impl CacheConfig {
    pub fn header_value(&self) -> String {
        format!(
            "public, max-age={}, s-maxage={}",
            self.max_age, self.s_maxage
        )
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    use crate::config::test_parse_config;
    use crate::og::handler::DEFAULT_CACHE_CONTROL;

    #[test]
    fn test_serve_config() {
        let config = test_parse_config("[serve]\ninterface = \"0.0.0.0\"\nport = 8080");
        assert_eq!(
            config.serve.interface,
            IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))
        );
        assert_eq!(config.serve.port, 8080);
    }

    #[test]
    fn test_serve_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(
            config.serve.interface,
            IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert_eq!(config.serve.port, 4321);
        assert_eq!(config.serve.cache.header_value(), DEFAULT_CACHE_CONTROL);
    }

    #[test]
    fn test_serve_ipv6() {
        let config = test_parse_config("[serve]\ninterface = \"::1\"");
        assert_eq!(
            config.serve.interface,
            IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    }

    #[test]
    fn test_cache_override() {
        let config = test_parse_config("[serve.cache]\nmax_age = 60");
        assert_eq!(
            config.serve.cache.header_value(),
            "public, max-age=60, s-maxage=604800"
        );
    }
}
