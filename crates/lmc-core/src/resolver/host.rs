//! Host collaborator contracts.
//!
//! The embedding framework supplies concrete implementations at construction
//! time; the resolver depends only on these traits and never reaches into the
//! host's internals.

use std::collections::HashMap;

/// Content returned by the host's static-content resolution on a hit.
#[derive(Debug, Clone)]
pub struct HostContent {
    pub body: Vec<u8>,
    pub headers: HashMap<String, String>,
}

/// Host static-content delegate.
///
/// `allow_fallback` controls whether a miss may be answered with the
/// single-page application's index document (client-side routing).
pub trait StaticContentProvider: Send + Sync {
    fn try_get_content(&self, uri: &str, allow_fallback: bool) -> Option<HostContent>;
}

/// Host fallback-eligibility delegate.
///
/// An asset-style request nested under the app's own content root is
/// "subordinate" and must not fall back to the index document; only
/// navigation-style requests may.
pub trait OriginPolicy: Send + Sync {
    fn is_subordinate_resource(&self, base_origin: &str, uri: &str) -> bool;
}
