//! Request URI modeling for the custom scheme.

/// Strip any query string from a request URI.
///
/// Content addressing and static lookup must ignore cache-busting or bridge
/// parameters the webview appends.
pub fn strip_query(uri: &str) -> &str {
    match uri.find('?') {
        Some(i) => &uri[..i],
        None => uri,
    }
}

/// Path component of a scheme request URI, without the leading slash.
///
/// Returns `None` if the URI cannot be parsed.
pub fn request_path(uri: &str) -> Option<String> {
    let parsed = url::Url::parse(uri).ok()?;
    Some(parsed.path().trim_start_matches('/').to_string())
}
