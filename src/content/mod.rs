//! Post metadata lookup.
//!
//! The renderer only needs `(slug, title)` pairs per collection. Two stores:
//!
//! - [`FsContentStore`]: markdown files with frontmatter under `content/<collection>/`
//! - [`MemoryStore`]: fixed entries, for tests and embedding

mod frontmatter;
mod fs;
mod slug;

pub use fs::FsContentStore;

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Minimal post metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostEntry {
    pub slug: String,
    pub title: String,
}

impl PostEntry {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
        }
    }
}

/// Source of post metadata, keyed by collection name (`writing`, `thought`).
pub trait ContentStore: Send + Sync {
    /// All published posts in a collection. Unknown collection: empty list.
    fn posts_in_section(&self, collection: &str) -> Vec<PostEntry>;

    /// Title lookup for one slug.
    fn find_post(&self, collection: &str, slug: &str) -> Option<PostEntry> {
        self.posts_in_section(collection)
            .into_iter()
            .find(|post| post.slug == slug)
    }
}

/// In-memory content store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    sections: FxHashMap<String, Vec<PostEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(
        mut self,
        collection: &str,
        slug: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        self.sections
            .entry(collection.to_string())
            .or_default()
            .push(PostEntry::new(slug, title));
        self
    }
}

impl ContentStore for MemoryStore {
    fn posts_in_section(&self, collection: &str) -> Vec<PostEntry> {
        self.sections.get(collection).cloned().unwrap_or_default()
    }
}
