//! Scheme request resolution.
//!
//! Per request: custom path interception first, then query stripping, then the
//! host's static-content lookup (with or without SPA fallback), yielding a 200
//! or 404 envelope. Resolution is a pure function of filesystem and delegate
//! state; it never mutates the cache and holds no per-request state.

mod envelope;
mod host;
mod intercept;

pub use envelope::{ResponseEnvelope, NO_CACHE};
pub use host::{HostContent, OriginPolicy, StaticContentProvider};
pub use intercept::CustomPathRule;

use std::sync::Arc;

use crate::content_type;
use crate::request;

/// Resolver for one webview's custom scheme.
///
/// Collaborators are injected at construction; there is no ambient state.
pub struct SchemeResolver {
    base_origin: String,
    rules: Vec<CustomPathRule>,
    origin_policy: Arc<dyn OriginPolicy>,
    content: Arc<dyn StaticContentProvider>,
}

impl SchemeResolver {
    pub fn new(
        base_origin: impl Into<String>,
        origin_policy: Arc<dyn OriginPolicy>,
        content: Arc<dyn StaticContentProvider>,
    ) -> Self {
        Self {
            base_origin: base_origin.into(),
            rules: Vec::new(),
            origin_policy,
            content,
        }
    }

    /// Install custom path interception rules, checked in order.
    pub fn with_rules(mut self, rules: Vec<CustomPathRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Resolve a request end to end, computing fallback eligibility from the
    /// origin policy: only navigation-style requests may fall back to the
    /// host page.
    pub fn handle(&self, request_uri: &str) -> ResponseEnvelope {
        let allow_host_fallback = !self
            .origin_policy
            .is_subordinate_resource(&self.base_origin, request_uri);
        self.resolve(request_uri, allow_host_fallback)
    }

    /// Resolve a request with an explicit fallback decision.
    ///
    /// Returns exactly one of: 200 with non-empty content type and the full
    /// header set, or 404 with empty body.
    pub fn resolve(&self, request_uri: &str, allow_host_fallback: bool) -> ResponseEnvelope {
        if let Some(envelope) = self.intercept_custom_path(request_uri) {
            return envelope;
        }

        let uri = request::strip_query(request_uri);
        let rel = request::request_path(uri);
        tracing::debug!(uri, path = rel.as_deref().unwrap_or(""), "handling scheme request");

        match self.content.try_get_content(uri, allow_host_fallback) {
            Some(found) => {
                let content_type = found
                    .headers
                    .get("Content-Type")
                    .cloned()
                    .unwrap_or_else(|| content_type::DEFAULT_CONTENT_TYPE.to_string());
                tracing::debug!(uri, status = 200u16, "response content being sent");
                ResponseEnvelope::ok(content_type, found.body)
            }
            None => {
                tracing::debug!(uri, "response content not found");
                ResponseEnvelope::not_found()
            }
        }
    }

    /// Serve a matching direct-filesystem rule if its target exists. A rule
    /// whose target is missing or unreadable falls through to normal
    /// resolution, as does any non-matching request.
    fn intercept_custom_path(&self, request_uri: &str) -> Option<ResponseEnvelope> {
        for rule in &self.rules {
            let Some(path) = rule.target_path(request_uri) else {
                continue;
            };
            if !path.is_file() {
                continue;
            }
            match std::fs::read(&path) {
                Ok(body) => {
                    tracing::debug!(path = %path.display(), "serving intercepted filesystem path");
                    let ct = content_type::content_type_for_path(&path);
                    return Some(ResponseEnvelope::ok(ct, body));
                }
                Err(err) => {
                    // Vanished or became unreadable between the existence
                    // check and the read.
                    tracing::warn!(path = %path.display(), %err, "intercepted path read failed");
                }
            }
        }
        None
    }
}
