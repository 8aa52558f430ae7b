//! Content sections and their route/collection names.

use std::fmt;

/// A top-level content category. Selects the accent color of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    Writing,
    /// Default color scheme for unknown sections.
    #[default]
    Thought,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Writing, Section::Thought];

    /// Collection name in the content store (`writing`).
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Writing => "writing",
            Self::Thought => "thought",
        }
    }

    /// URL segment under `/og/` (`writings`).
    pub const fn route(self) -> &'static str {
        match self {
            Self::Writing => "writings",
            Self::Thought => "thoughts",
        }
    }

    /// Map a URL segment to a section. Anything outside the fixed set is `None`.
    pub fn from_route(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.route() == segment)
    }

    /// Map a collection name to a section.
    pub fn from_collection(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.collection() == name)
    }

    /// Like [`Section::from_collection`], but unknown names get the default scheme.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_collection(name).unwrap_or_default()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}
