//! `ogcard paths`: list every pre-renderable image.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::og::{OgHandler, OgRoute};

/// One image path with the data it is rendered from.
#[derive(Debug, Serialize)]
struct PathEntry {
    path: String,
    section: &'static str,
    slug: String,
    theme: &'static str,
}

impl From<&OgRoute> for PathEntry {
    fn from(route: &OgRoute) -> Self {
        Self {
            path: route.path(),
            section: route.section.collection(),
            slug: route.slug.clone(),
            theme: route.theme.as_str(),
        }
    }
}

pub fn list_paths(handler: &OgHandler, json: bool) -> Result<()> {
    let stdout = std::io::stdout();
    write_paths(&mut stdout.lock(), &handler.routes(), json)
}

fn write_paths(out: &mut impl Write, routes: &[OgRoute], json: bool) -> Result<()> {
    if json {
        let entries: Vec<PathEntry> = routes.iter().map(PathEntry::from).collect();
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)?;
    } else {
        for route in routes {
            writeln!(out, "{route}")?;
        }
    }
    Ok(())
}
