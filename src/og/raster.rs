//! SVG → PNG rasterization with resvg.
//!
//! The font database is the only process-wide cost. It is built on first use
//! behind an init guard and shared by every later render.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use parking_lot::Mutex;
use resvg::tiny_skia;
use serde::{Deserialize, Serialize};
use usvg::fontdb;

use super::RenderError;
use super::layout::CANVAS_WIDTH;
use crate::{debug, log};

/// Font sources and defaults for text without an explicit family.
///
/// # Example
///
/// ```toml
/// [render.fonts]
/// files = ["public/fonts/NotoSansSC.otf"]  # bundled fonts (CJK fallback)
/// dirs = []                                # extra font directories
/// system = true                            # also load host fonts
/// default_family = "Inter"
/// default_size = 52.0
/// strict = false                           # fail instead of warn on missing fonts
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
    pub system: bool,
    pub default_family: String,
    pub default_size: f32,
    pub strict: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            dirs: Vec::new(),
            system: true,
            default_family: "Inter".into(),
            default_size: 52.0,
            strict: false,
        }
    }
}

/// Initialised rendering state.
struct Engine {
    fontdb: Arc<fontdb::Database>,
}

impl Engine {
    fn load(fonts: &FontConfig) -> Result<Self, RenderError> {
        let mut db = fontdb::Database::new();
        let mut missing = Vec::new();

        for file in &fonts.files {
            if let Err(e) = db.load_font_file(file) {
                missing.push(format!("{} ({e})", file.display()));
            }
        }
        for dir in &fonts.dirs {
            if dir.is_dir() {
                db.load_fonts_dir(dir);
            } else {
                missing.push(format!("{} (not a directory)", dir.display()));
            }
        }
        if fonts.system {
            db.load_system_fonts();
        }

        if !missing.is_empty() {
            if fonts.strict {
                return Err(RenderError::Fonts(format!(
                    "missing font assets: {}",
                    missing.join(", ")
                )));
            }
            for asset in &missing {
                log!("fonts"; "skipping {}, falling back to host fonts", asset);
            }
        }

        if db.is_empty() {
            if fonts.strict {
                return Err(RenderError::Fonts("no font faces available".into()));
            }
            log!("fonts"; "no font faces available, text will not be drawn");
        }

        db.set_sans_serif_family(fonts.default_family.clone());
        debug!("fonts"; "loaded {} font faces", db.len());

        Ok(Self {
            fontdb: Arc::new(db),
        })
    }
}

/// Renders SVG documents to PNG bytes at the canvas width.
pub struct Rasterizer {
    fonts: FontConfig,
    engine: OnceLock<Engine>,
    init_guard: Mutex<()>,
}

impl Rasterizer {
    pub fn new(fonts: FontConfig) -> Self {
        Self {
            fonts,
            engine: OnceLock::new(),
            init_guard: Mutex::new(()),
        }
    }

    pub fn fonts(&self) -> &FontConfig {
        &self.fonts
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.get().is_some()
    }

    /// Load fonts once. Returns `Ok(())` immediately when already initialised.
    ///
    /// Concurrent first callers block until the winner finishes. A failed
    /// attempt is not remembered; the next call tries again.
    pub fn init(&self) -> Result<(), RenderError> {
        self.engine().map(|_| ())
    }

    fn engine(&self) -> Result<&Engine, RenderError> {
        if let Some(engine) = self.engine.get() {
            return Ok(engine);
        }

        let _guard = self.init_guard.lock();
        if let Some(engine) = self.engine.get() {
            return Ok(engine);
        }

        let engine = Engine::load(&self.fonts)?;
        Ok(self.engine.get_or_init(|| engine))
    }

    /// Rasterize an SVG document, scaled to [`CANVAS_WIDTH`] pixels wide.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rasterize(&self, svg: &str) -> Result<Vec<u8>, RenderError> {
        let engine = self.engine()?;

        let options = usvg::Options {
            font_family: self.fonts.default_family.clone(),
            font_size: self.fonts.default_size,
            fontdb: Arc::clone(&engine.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(svg, &options)?;

        let size = tree.size();
        let scale = CANVAS_WIDTH as f32 / size.width();
        let width = CANVAS_WIDTH;
        let height = (size.height() * scale).round() as u32;

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RenderError::Pixmap { width, height })?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            pixmap.data(),
            width,
            height,
            ExtendedColorType::Rgba8,
        )?;

        if png.is_empty() {
            return Err(RenderError::EmptyOutput);
        }
        Ok(png)
    }
}
