//! HTTP response handlers.

use crate::og::OgResponse;
use crate::utils::mime::types::{PLAIN, PNG};
use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Map an image outcome to a response.
pub fn respond_og(request: Request, og: OgResponse) -> Result<()> {
    let status = StatusCode(og.status());
    match og {
        OgResponse::Png {
            body,
            etag,
            cache_control,
        } => {
            let headers = [
                make_header("Content-Type", PNG)?,
                make_header("Cache-Control", &cache_control)?,
                make_header("ETag", &etag)?,
            ];
            if is_head_request(&request) {
                return send_head(request, status, headers, body.len());
            }
            let mut response = Response::from_data(body).with_status_code(status);
            for header in headers {
                response.add_header(header);
            }
            request.respond(response)?;
        }
        OgResponse::NotModified {
            etag,
            cache_control,
        } => {
            let response = Response::empty(status)
                .with_header(make_header("Cache-Control", &cache_control)?)
                .with_header(make_header("ETag", &etag)?);
            request.respond(response)?;
        }
        OgResponse::Redirect { location } => {
            let response =
                Response::empty(status).with_header(make_header("Location", &location)?);
            request.respond(response)?;
        }
    }
    Ok(())
}

/// Respond with a static file.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);
    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    if is_head_request(&request) {
        let len = body.len();
        let headers = [make_header("Content-Type", content_type)?];
        return send_head(request, StatusCode(200), headers, len);
    }
    send_body(request, 200, content_type, body)
}

pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_data(b"405 Method Not Allowed".to_vec())
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN)?)
        .with_header(make_header("Allow", "GET, HEAD")?);
    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

/// Headers of a GET response with the body left out.
fn send_head<const N: usize>(
    request: Request,
    status: StatusCode,
    headers: [Header; N],
    content_length: usize,
) -> Result<()> {
    let response = Response::new(
        status,
        headers.into(),
        std::io::empty(),
        Some(content_length),
        None,
    );
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &str) -> Result<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid `{key}` header value: {value:?}"))
}
