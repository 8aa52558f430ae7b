//! Title layout: truncation, font-size tiers, greedy word wrap and vertical centering.
//!
//! Widths are estimated from character counts, not glyph metrics. CJK titles
//! without spaces stay on one line.

/// Canvas width in SVG user units.
pub const CANVAS_WIDTH: u32 = 1200;
/// Canvas height in SVG user units.
pub const CANVAS_HEIGHT: u32 = 630;

/// Titles longer than this are cut and get [`ELLIPSIS`].
pub const MAX_TITLE_CHARS: usize = 80;
pub const ELLIPSIS: &str = "...";

/// Width budget for one title line.
const WRAP_WIDTH: f64 = 1000.0;
const CHAR_WIDTH_RATIO: f64 = 0.52;
const LINE_HEIGHT_RATIO: f64 = 1.15;
const BASELINE_RATIO: f64 = 0.8;

/// Font sizes by title length: (exclusive lower bound on length, size).
const FONT_TIERS: [(usize, u32); 2] = [(40, 48), (25, 56)];
const LARGE_FONT: u32 = 64;

/// Computed placement of the title block.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Title after truncation.
    pub display_title: String,
    pub font_size: u32,
    pub lines: Vec<String>,
    pub line_height: f64,
    pub title_block_height: f64,
    /// Baseline of the first line.
    pub title_start_y: f64,
}

impl Layout {
    pub fn compute(title: &str) -> Self {
        Self::build(title, false)
    }

    /// Like [`Layout::compute`], with the wrapped lines lowercased.
    ///
    /// Truncation and the font tier still follow the title as written.
    pub fn compute_lowercase(title: &str) -> Self {
        Self::build(title, true)
    }

    fn build(title: &str, lowercase: bool) -> Self {
        let display_title = truncate_title(title);
        let font_size = font_size_for(display_title.chars().count());
        let font = f64::from(font_size);

        let line_height = font * LINE_HEIGHT_RATIO;
        let max_chars = max_chars_per_line(font_size);
        let lines = if lowercase {
            wrap_words(&display_title.to_lowercase(), max_chars)
        } else {
            wrap_words(&display_title, max_chars)
        };
        let title_block_height = lines.len() as f64 * line_height;
        let title_start_y =
            (f64::from(CANVAS_HEIGHT) - title_block_height) / 2.0 + font * BASELINE_RATIO;

        Self {
            display_title,
            font_size,
            lines,
            line_height,
            title_block_height,
            title_start_y,
        }
    }

    /// Vertical offset of line `index` relative to the previous line.
    pub fn line_dy(&self, index: usize) -> f64 {
        if index == 0 { 0.0 } else { self.line_height }
    }
}

/// Cut to [`MAX_TITLE_CHARS`] characters, appending [`ELLIPSIS`] when cut.
pub fn truncate_title(title: &str) -> String {
    match title.char_indices().nth(MAX_TITLE_CHARS) {
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &title[..byte_idx]),
        None => title.to_string(),
    }
}

/// Pick the font size tier for a title of `len` characters.
pub fn font_size_for(len: usize) -> u32 {
    FONT_TIERS
        .iter()
        .find(|(threshold, _)| len > *threshold)
        .map_or(LARGE_FONT, |(_, size)| *size)
}

/// How many characters fit on one line at `font_size`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn max_chars_per_line(font_size: u32) -> usize {
    let avg_char_width = f64::from(font_size) * CHAR_WIDTH_RATIO;
    (WRAP_WIDTH / avg_char_width).floor() as usize
}

/// Greedy word wrap on whitespace.
///
/// A line grows while it stays within `max_chars`. A single token longer than
/// the budget gets a line of its own and is never split.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
