//! Color tables for dark and light images.

use std::fmt;
use std::str::FromStr;

use super::Section;

/// Image color theme, chosen by the caller through the path suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Filename suffix for pre-rendered images. Dark is the bare name.
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Dark => "",
            Self::Light => "-light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("unknown theme `{other}` (expected dark or light)")),
        }
    }
}

/// Resolved colors for one (section, theme) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionTheme {
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub meta: &'static str,
}

struct Base {
    background: &'static str,
    text: &'static str,
    meta: &'static str,
}

const DARK: Base = Base {
    background: "#0a0a0a",
    text: "#ffffff",
    meta: "#a3a3a3",
};

const LIGHT: Base = Base {
    background: "#f9fafb",
    text: "#111827",
    meta: "#6b7280",
};

const fn accent(section: Section, theme: Theme) -> &'static str {
    match (section, theme) {
        (Section::Writing, Theme::Dark) => "#f97316",
        (Section::Writing, Theme::Light) => "#ea580c",
        (Section::Thought, Theme::Dark) => "#ef4444",
        (Section::Thought, Theme::Light) => "#dc2626",
    }
}

impl SectionTheme {
    pub const fn resolve(section: Section, theme: Theme) -> Self {
        let base = match theme {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        };
        Self {
            accent: accent(section, theme),
            background: base.background,
            text: base.text,
            meta: base.meta,
        }
    }
}
