//! Content-type inference from file extension.

use std::path::Path;

/// Fallback MIME type for unknown extensions.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// MIME type for a path, by extension (case-insensitive).
pub fn content_type_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
