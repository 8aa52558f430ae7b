//! `ogcard render`: one title to a file, no content store involved.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::{
    config::SiteConfig,
    log,
    og::{OgRenderer, RenderRequest},
};

pub fn render_title(
    config: &SiteConfig,
    request: &RenderRequest,
    output: &Path,
    svg: bool,
) -> Result<()> {
    let renderer = OgRenderer::from_config(config);
    let bytes = render_bytes(&renderer, request, svg)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &bytes).with_context(|| format!("failed to write {}", output.display()))?;

    log!("og"; "{} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

fn render_bytes(renderer: &OgRenderer, request: &RenderRequest, svg: bool) -> Result<Vec<u8>> {
    if svg {
        Ok(renderer.document(request)?.into_bytes())
    } else {
        Ok(renderer.render(request)?)
    }
}
