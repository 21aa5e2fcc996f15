//! LMC core: content-addressed local media cache and custom URL scheme
//! resolution for embedded webviews.
//!
//! Application code imports a user-picked media file through
//! [`importer::MediaImporter`], embeds the returned virtual path in rendered
//! markup, and the platform's scheme-interception adapter answers the
//! webview's request for that path through [`scheme::SchemeHandler`].

pub mod config;
pub mod logging;

pub mod content_type;
pub mod fingerprint;
pub mod importer;
pub mod request;
pub mod resolver;
pub mod scheme;
