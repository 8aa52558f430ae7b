//! Image server.
//!
//! `/og/...` requests go through [`OgHandler`]; everything else is a static
//! file from `paths.public` (which is where the fallback image lives).

mod lifecycle;
mod path;
mod response;

use crate::{
    config::{SiteConfig, cfg},
    log,
    og::{OgHandler, route::OG_PREFIX},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tiny_http::{Method, Request, Server};

/// Worker threads for rendering requests.
const POOL_THREADS: usize = 4;

/// Bind, warm up the rasterizer and run the request loop until Ctrl+C.
pub fn serve() -> Result<()> {
    let config = cfg();
    let handler = Arc::new(super::og_handler(&config));

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    crate::core::register_server(Arc::clone(&server));

    // Font loading happens here instead of on the first request.
    if let Err(e) = handler.init() {
        log!("og"; "{}, requests will fall back", e);
    }

    log!("serve"; "http://{}", addr);
    run_request_loop(&server, &handler, &config)
}

fn run_request_loop(
    server: &Server,
    handler: &Arc<OgHandler>,
    config: &Arc<SiteConfig>,
) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(POOL_THREADS)
        .build()
        .context("failed to create thread pool")?;

    for request in server.incoming_requests() {
        let handler = Arc::clone(handler);
        let config = Arc::clone(config);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &handler, &config) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, handler: &OgHandler, config: &SiteConfig) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    if request.url().starts_with(OG_PREFIX) {
        let if_none_match = header_value(&request, "If-None-Match");
        let og = handler.handle(request.url(), if_none_match.as_deref());
        crate::debug!("serve"; "{} {}", og.status(), request.url());
        return response::respond_og(request, og);
    }

    if let Some(path) = path::resolve_path(request.url(), &config.paths.public) {
        return response::respond_file(request, &path);
    }

    response::respond_not_found(request)
}

fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
        .map(|h| h.value.to_string())
}
