//! Direct filesystem path interception.
//!
//! Requests under a recognized URL prefix map straight to an absolute path on
//! disk, bypassing the managed cache and the host's content resolution
//! entirely. Used for files the application references in place rather than
//! importing.

use std::path::PathBuf;

use crate::request;

/// One interception rule: a request starting with `url_prefix` maps the
/// remainder to an absolute filesystem path.
///
/// Example: prefix `app://local-file/` turns
/// `app://local-file/data/pictures/a.png` into `/data/pictures/a.png`.
#[derive(Debug, Clone)]
pub struct CustomPathRule {
    url_prefix: String,
}

impl CustomPathRule {
    pub fn new(url_prefix: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
        }
    }

    /// Filesystem path for `uri` if it matches this rule. Query parameters are
    /// ignored; an empty remainder does not match.
    pub fn target_path(&self, uri: &str) -> Option<PathBuf> {
        let uri = request::strip_query(uri);
        let rest = uri.strip_prefix(&self.url_prefix)?;
        let rest = rest.trim_start_matches('/');
        if rest.is_empty() {
            return None;
        }
        Some(PathBuf::from(format!("/{rest}")))
    }
}
