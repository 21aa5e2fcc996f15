//! Synthetic response shape handed back to the scheme-interception layer.

/// Cache-Control value on every 200 response. The interception injects a
/// one-time script into served documents; a cached pre-injection copy would
/// break the next load.
pub const NO_CACHE: &str = "no-cache, max-age=0, must-revalidate, no-store";

/// Result of resolving one scheme request: either a 200 carrying the full
/// mandated header set, or a bare 404 with empty body and content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
    pub headers: Vec<(String, String)>,
}

impl ResponseEnvelope {
    /// 200 response. `Content-Length` always equals the body length; the
    /// target interception API requires the full length up front, so the body
    /// is fully buffered.
    pub fn ok(content_type: impl Into<String>, body: Vec<u8>) -> Self {
        let content_type = content_type.into();
        let headers = vec![
            ("Content-Length".to_string(), body.len().to_string()),
            ("Content-Type".to_string(), content_type.clone()),
            ("Cache-Control".to_string(), NO_CACHE.to_string()),
        ];
        Self {
            status: 200,
            content_type,
            body,
            headers,
        }
    }

    /// 404 response; the webview shows its native broken-media presentation.
    pub fn not_found() -> Self {
        Self {
            status: 404,
            content_type: String::new(),
            body: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Value of a header by name (ASCII case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
