//! SVG document composition.

use std::fmt::{self, Write};

use super::layout::{CANVAS_HEIGHT, CANVAS_WIDTH, Layout};
use super::theme::SectionTheme;
use crate::utils::xml::escape;

/// Left margin of the title and footer.
const MARGIN_X: u32 = 60;

/// Site identity printed on every image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub author: String,
    pub identity: String,
    /// Footer text, usually the site host.
    pub domain: String,
    /// `font-family` of the title.
    pub title_font: String,
    /// `font-family` of byline and footer.
    pub meta_font: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            author: "Jesse Lin".into(),
            identity: "数字生命".into(),
            domain: "them.selv.es".into(),
            title_font: "Noto Sans SC, Inter, sans-serif".into(),
            meta_font: "Inter, -apple-system, BlinkMacSystemFont, Segoe UI, Roboto, sans-serif"
                .into(),
        }
    }
}

/// Build the 1200×630 SVG for a laid-out title.
///
/// Every piece of caller text is XML-escaped; the output is always well-formed.
pub fn compose_document(
    layout: &Layout,
    colors: &SectionTheme,
    branding: &Branding,
    section_label: &str,
) -> Result<String, fmt::Error> {
    let meta_font = escape(&branding.meta_font);
    let title_font = escape(&branding.title_font);

    let mut svg = String::with_capacity(1536);

    writeln!(
        svg,
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
        w = CANVAS_WIDTH,
        h = CANVAS_HEIGHT,
    )?;
    writeln!(
        svg,
        r#"  <rect width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" fill="{}"/>"#,
        colors.background
    )?;

    // Byline
    writeln!(
        svg,
        r#"  <circle cx="72" cy="60" r="6" fill="{}"/>"#,
        colors.accent
    )?;
    writeln!(
        svg,
        r#"  <text x="90" y="68" fill="{}" font-family="{meta_font}" font-size="24">{} · {} · {}</text>"#,
        colors.meta,
        escape(&branding.author),
        escape(&branding.identity),
        escape(section_label),
    )?;

    // Title
    write!(
        svg,
        r#"  <text x="{MARGIN_X}" y="{}" fill="{}" font-family="{title_font}" font-size="{}" font-weight="600" letter-spacing="-0.5">"#,
        layout.title_start_y, colors.text, layout.font_size,
    )?;
    for (i, line) in layout.lines.iter().enumerate() {
        write!(
            svg,
            r#"<tspan x="{MARGIN_X}" dy="{}">{}</tspan>"#,
            layout.line_dy(i),
            escape(line)
        )?;
    }
    svg.push_str("</text>\n");

    // Footer
    writeln!(
        svg,
        r#"  <text x="{MARGIN_X}" y="580" fill="{}" font-family="{meta_font}" font-size="24">{}</text>"#,
        colors.meta,
        escape(&branding.domain),
    )?;
    writeln!(
        svg,
        r#"  <rect x="1020" y="577" width="120" height="6" rx="3" fill="{}"/>"#,
        colors.accent
    )?;
    svg.push_str("</svg>\n");

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::og::{Section, Theme};

    fn compose(title: &str, section: Section, theme: Theme) -> String {
        compose_document(
            &Layout::compute(title),
            &SectionTheme::resolve(section, theme),
            &Branding::default(),
            section.collection(),
        )
        .unwrap()
    }

    /// Text between tags, i.e. everything outside `<...>`.
    fn text_content(svg: &str) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for c in svg.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }
        out
    }

    #[test]
    fn test_canvas_and_colors() {
        let svg = compose("hello", Section::Writing, Theme::Dark);
        assert!(svg.starts_with(r#"<svg width="1200" height="630""#));
        assert!(svg.contains(r##"fill="#0a0a0a""##));
        assert!(svg.contains(r##"<circle cx="72" cy="60" r="6" fill="#f97316"/>"##));
        assert!(svg.contains(r##"rx="3" fill="#f97316""##));
        assert!(svg.contains("Jesse Lin · 数字生命 · writing"));
        assert!(svg.contains(">them.selv.es</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_light_theme_colors() {
        let svg = compose("hello", Section::Thought, Theme::Light);
        assert!(svg.contains(r##"fill="#f9fafb""##));
        assert!(svg.contains(r##"fill="#111827""##));
        assert!(svg.contains(r##"fill="#dc2626""##));
    }

    #[test]
    fn test_title_tspans() {
        let layout = Layout::compute("building a tiny renderer for open graph images in rust today");
        let svg = compose_document(
            &layout,
            &SectionTheme::resolve(Section::Writing, Theme::Dark),
            &Branding::default(),
            "writing",
        )
        .unwrap();
        assert_eq!(svg.matches("<tspan").count(), layout.lines.len());
        assert!(svg.contains(r#"<tspan x="60" dy="0">building a tiny"#));
        assert!(svg.contains(&format!(r#"<tspan x="60" dy="{}">images"#, layout.line_height)));
        assert!(svg.contains(&format!(r#"y="{}""#, layout.title_start_y)));
        assert!(svg.contains(r#"font-size="48""#));
    }

    #[test]
    fn test_title_is_escaped() {
        let svg = compose(r#"Tom & "Jerry" <script>"#, Section::Writing, Theme::Dark);
        let text = text_content(&svg);
        assert!(!text.contains('<'));
        assert!(!text.contains('"'));
        assert!(
            text.replace("&amp;", "")
                .replace("&lt;", "")
                .replace("&gt;", "")
                .replace("&quot;", "")
                .replace("&apos;", "")
                .find('&')
                .is_none()
        );
        assert!(svg.contains("Tom &amp; &quot;Jerry&quot; &lt;script&gt;"));
    }

    #[test]
    fn test_section_label_and_branding_escaped() {
        let branding = Branding {
            author: "A&B".into(),
            domain: "<x>".into(),
            ..Branding::default()
        };
        let svg = compose_document(
            &Layout::compute("t"),
            &SectionTheme::resolve(Section::Thought, Theme::Dark),
            &branding,
            "it's",
        )
        .unwrap();
        assert!(svg.contains("A&amp;B · 数字生命 · it&apos;s"));
        assert!(svg.contains("&lt;x&gt;"));
    }

    #[test]
    fn test_empty_layout_still_valid() {
        let svg = compose("", Section::Thought, Theme::Dark);
        assert!(!svg.contains("<tspan"));
        assert!(svg.contains("letter-spacing=\"-0.5\"></text>"));
    }
}
