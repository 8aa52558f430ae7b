//! Pre-rendering of every post's images.
//!
//! Writes `<output>/og/{section}/{slug}[-light].png`, the same paths the
//! server answers, so a static host can serve them directly.

use crate::{
    config::SiteConfig,
    core::is_shutdown,
    log,
    logger::ProgressLine,
    og::{OgHandler, OgRoute, Section},
    utils::plural_count,
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// Directory under the output root that holds generated images.
const OG_DIR: &str = "og";

/// Outcome of a build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub written: usize,
    pub failed: Vec<(String, String)>,
    pub skipped: usize,
}

pub fn build_images(config: &SiteConfig, clean: bool) -> Result<()> {
    let handler = super::og_handler(config);
    handler.init().context("failed to load fonts")?;

    let report = render_all(&handler, &config.paths.output, clean)?;

    for (path, error) in &report.failed {
        log!("error"; "{}: {}", path, error);
    }
    log!(
        "build";
        "{} written to {}",
        plural_count(report.written, "image"),
        config.root_relative(&config.paths.output).display()
    );

    if report.skipped > 0 {
        bail!("interrupted, {} not rendered", plural_count(report.skipped, "image"));
    }
    if !report.failed.is_empty() {
        bail!("{} failed", plural_count(report.failed.len(), "image"));
    }
    Ok(())
}

/// Render every route into `output`, in parallel.
pub fn render_all(handler: &OgHandler, output: &Path, clean: bool) -> Result<BuildReport> {
    let og_root = output.join(OG_DIR);
    if clean && og_root.exists() {
        fs::remove_dir_all(&og_root)
            .with_context(|| format!("failed to clean {}", og_root.display()))?;
    }
    fs::create_dir_all(&og_root)
        .with_context(|| format!("failed to create {}", og_root.display()))?;

    let routes = handler.routes();
    let counts: Vec<_> = Section::ALL
        .into_iter()
        .map(|section| {
            let total = routes.iter().filter(|r| r.section == section).count();
            (section.collection(), total)
        })
        .collect();
    let progress = ProgressLine::new(&counts);

    let results: Vec<RouteResult> = routes
        .par_iter()
        .map(|route| {
            if is_shutdown() {
                return RouteResult::Skipped;
            }
            let result = write_route(handler, output, route);
            progress.inc(route.section.collection());
            match result {
                Ok(()) => RouteResult::Written,
                Err(e) => RouteResult::Failed(route.path(), format!("{e:#}")),
            }
        })
        .collect();
    progress.finish();

    let mut report = BuildReport::default();
    for result in results {
        match result {
            RouteResult::Written => report.written += 1,
            RouteResult::Skipped => report.skipped += 1,
            RouteResult::Failed(path, error) => report.failed.push((path, error)),
        }
    }
    Ok(report)
}

enum RouteResult {
    Written,
    Skipped,
    Failed(String, String),
}

fn write_route(handler: &OgHandler, output: &Path, route: &OgRoute) -> Result<()> {
    let path = output_path(output, route)?;
    let png = handler.render_route(route)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, png).with_context(|| format!("failed to write {}", path.display()))
}

/// File for a route, refusing slugs that would leave the output directory.
fn output_path(output: &Path, route: &OgRoute) -> Result<PathBuf> {
    let relative = PathBuf::from(route.path().trim_start_matches('/'));
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        bail!("unsafe slug `{}`", route.slug);
    }
    Ok(output.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryStore;
    use crate::og::Theme;
    use crate::og::tests::{PNG_MAGIC, offline_renderer};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn handler(store: MemoryStore) -> OgHandler {
        OgHandler::new(Arc::new(store), Arc::new(offline_renderer()))
    }

    #[test]
    fn test_render_all_writes_both_themes() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new()
            .with_post("writing", "hello", "Hello")
            .with_post("thought", "2024/idea", "Idea");

        let report = render_all(&handler(store), dir.path(), false).unwrap();
        assert_eq!(report.written, 4);
        assert!(report.failed.is_empty());

        for rel in [
            "og/writings/hello.png",
            "og/writings/hello-light.png",
            "og/thoughts/2024/idea.png",
            "og/thoughts/2024/idea-light.png",
        ] {
            let png = fs::read(dir.path().join(rel)).unwrap();
            assert!(png.starts_with(PNG_MAGIC), "{rel}");
        }
    }

    #[test]
    fn test_failures_are_reported() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new()
            .with_post("writing", "ok", "Fine")
            .with_post("writing", "blank", " ");

        let report = render_all(&handler(store), dir.path(), false).unwrap();
        assert_eq!(report.written, 2);
        assert_eq!(report.failed.len(), 2);
        assert!(report.failed.iter().all(|(path, _)| path.contains("blank")));
    }

    #[test]
    fn test_clean_removes_stale_images() {
        let dir = TempDir::new().unwrap();
        let stale = dir.path().join("og/writings/old.png");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, b"old").unwrap();

        render_all(&handler(MemoryStore::new()), dir.path(), true).unwrap();
        assert!(!stale.exists());
        assert!(dir.path().join("og").is_dir());
    }

    #[test]
    fn test_output_path_rejects_traversal() {
        let out = Path::new("/srv/dist");
        let ok = OgRoute::new(Section::Writing, "a/b", Theme::Light);
        assert_eq!(
            output_path(out, &ok).unwrap(),
            PathBuf::from("/srv/dist/og/writings/a/b-light.png")
        );

        let bad = OgRoute::new(Section::Writing, "../../etc/x", Theme::Dark);
        assert!(output_path(out, &bad).is_err());
    }
}
