//! Markdown content directory as a [`ContentStore`].

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::{ContentStore, PostEntry, frontmatter, slug::slug_from_path};
use crate::debug;

const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown", "mdx"];

/// Reads `<root>/<collection>/**/*.md` on every call.
///
/// No caching: edits show up on the next request, and the scan of a
/// personal blog's content tree is cheap next to a render.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_entry(&self, dir: &Path, path: &Path) -> Option<PostEntry> {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                debug!("content"; "cannot read {}: {}", path.display(), e);
                return None;
            }
        };

        let meta = match frontmatter::extract(&source) {
            Ok(Some(meta)) => meta,
            Ok(None) => {
                debug!("content"; "no frontmatter in {}", path.display());
                return None;
            }
            Err(e) => {
                debug!("content"; "{}: {}", path.display(), e);
                return None;
            }
        };

        if meta.draft {
            return None;
        }
        let title = meta.title.filter(|t| !t.trim().is_empty())?;

        let slug = match meta.slug {
            Some(slug) => slug.trim_matches('/').to_string(),
            None => slug_from_path(path.strip_prefix(dir).unwrap_or(path)),
        };

        Some(PostEntry { slug, title })
    }
}

impl ContentStore for FsContentStore {
    fn posts_in_section(&self, collection: &str) -> Vec<PostEntry> {
        // Collection names are plain identifiers; never walk outside root.
        if collection.is_empty() || collection.contains(['/', '\\', '.']) {
            return Vec::new();
        }

        let dir = self.root.join(collection);
        if !dir.is_dir() {
            return Vec::new();
        }

        let mut posts: Vec<PostEntry> = WalkDir::new(&dir)
            .sort(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path())
            .filter(|p| is_content_file(p))
            .filter_map(|p| self.read_entry(&dir, &p))
            .collect();

        posts.sort_by(|a, b| a.slug.cmp(&b.slug));
        posts
    }
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "writing/hello-world.md", "---\ntitle: Hello World\n---\nbody");
        write(root, "writing/2024/Deep Dive.md", "---\ntitle: \"Deep: Dive\"\n---\n");
        write(root, "writing/custom.md", "+++\ntitle = \"Custom\"\nslug = \"renamed\"\n+++\n");
        write(root, "writing/draft.md", "---\ntitle: Draft\ndraft: true\n---\n");
        write(root, "writing/untitled.md", "---\ndate: 2024-01-01\n---\n");
        write(root, "writing/notes.txt", "---\ntitle: Not content\n---\n");
        write(root, "thought/idea.mdx", "---\ntitle: An idea\n---\n");
        dir
    }

    #[test]
    fn test_posts_in_section() {
        let dir = fixture();
        let store = FsContentStore::new(dir.path());

        let posts = store.posts_in_section("writing");
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["2024/deep-dive", "hello-world", "renamed"]);
        assert_eq!(posts[0].title, "Deep: Dive");
    }

    #[test]
    fn test_find_post() {
        let dir = fixture();
        let store = FsContentStore::new(dir.path());

        assert_eq!(
            store.find_post("thought", "idea"),
            Some(PostEntry::new("idea", "An idea"))
        );
        assert_eq!(store.find_post("writing", "draft"), None);
        assert_eq!(store.find_post("writing", "untitled"), None);
    }

    #[test]
    fn test_unknown_or_unsafe_collection() {
        let dir = fixture();
        let store = FsContentStore::new(dir.path());

        assert!(store.posts_in_section("nonexistent").is_empty());
        assert!(store.posts_in_section("../writing").is_empty());
        assert!(store.posts_in_section("").is_empty());
    }

    #[test]
    fn test_missing_root() {
        let store = FsContentStore::new("/nonexistent/content");
        assert!(store.posts_in_section("writing").is_empty());
    }
}
