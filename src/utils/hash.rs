//! Content digests.

/// Strong ETag value for a response body (quoted, 16 hex chars of blake3).
pub fn etag(body: &[u8]) -> String {
    let hash = blake3::hash(body);
    format!("\"{}\"", &hash.to_hex()[..16])
}

/// Check an `If-None-Match` header value against an ETag.
///
/// Handles `*`, comma-separated lists and weak validators (`W/"..."`).
pub fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}
