//! Configuration section definitions.

mod paths;
mod render;
mod serve;
mod site;

pub use paths::PathsConfig;
pub use render::RenderConfig;
pub use serve::{CacheConfig, ServeConfig};
pub use site::SiteSectionConfig;
