//! Integration test: import a media file into a temp cache, then serve it
//! back through the scheme resolver with a disk-backed host delegate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lmc_core::content_type::content_type_for_path;
use lmc_core::importer::MediaImporter;
use lmc_core::request::strip_query;
use lmc_core::resolver::{
    CustomPathRule, HostContent, OriginPolicy, SchemeResolver, StaticContentProvider,
};
use tempfile::tempdir;

const BASE_ORIGIN: &str = "app://0.0.0.0/";

/// Host delegate double: resolves requests under the app origin against the
/// app data root on disk, with an optional index document for SPA fallback.
struct DiskHost {
    root: PathBuf,
    index: Option<Vec<u8>>,
}

impl StaticContentProvider for DiskHost {
    fn try_get_content(&self, uri: &str, allow_fallback: bool) -> Option<HostContent> {
        let rel = uri.strip_prefix(BASE_ORIGIN)?;
        let path = self.root.join(rel);
        let (body, ct) = match std::fs::read(&path) {
            Ok(body) => (body, content_type_for_path(&path)),
            Err(_) if allow_fallback => (self.index.clone()?, "text/html".to_string()),
            Err(_) => return None,
        };
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), ct);
        Some(HostContent { body, headers })
    }
}

/// Navigation-style requests (no file extension) may fall back; assets not.
struct ExtensionPolicy;

impl OriginPolicy for ExtensionPolicy {
    fn is_subordinate_resource(&self, base_origin: &str, uri: &str) -> bool {
        let path = strip_query(uri);
        path.starts_with(base_origin) && path.rsplit('/').next().is_some_and(|s| s.contains('.'))
    }
}

fn resolver_for(root: &Path) -> SchemeResolver {
    let host = DiskHost {
        root: root.to_path_buf(),
        index: Some(b"<html>spa index</html>".to_vec()),
    };
    SchemeResolver::new(BASE_ORIGIN, Arc::new(ExtensionPolicy), Arc::new(host))
        .with_rules(vec![CustomPathRule::new("app://local-file/")])
}

#[tokio::test]
async fn imported_file_is_served_with_correct_headers() {
    let app_data = tempdir().unwrap();
    let picked = tempdir().unwrap();
    let src = picked.path().join("IMG_0001.JPG");
    let content = b"The quick brown fox jumps over the lazy dog".to_vec();
    tokio::fs::write(&src, &content).await.unwrap();

    let importer = MediaImporter::new(app_data.path(), "media");
    let vpath = importer.import_file(Some(&src)).await.unwrap().unwrap();
    assert_eq!(vpath, "media/9e107d9d372bb6826bd81d3542a419d6.JPG");

    let resolver = resolver_for(app_data.path());
    let uri = format!("{BASE_ORIGIN}{vpath}?t=1695000000");
    let env = resolver.handle(&uri);

    assert_eq!(env.status, 200);
    assert_eq!(env.content_type, "image/jpeg");
    assert_eq!(env.body, content);
    assert!(env
        .headers
        .iter()
        .any(|(n, v)| n == "Content-Length" && v == &content.len().to_string()));
}

#[tokio::test]
async fn double_import_yields_one_cache_entry_and_same_path() {
    let app_data = tempdir().unwrap();
    let picked = tempdir().unwrap();
    let first = picked.path().join("first.mp4");
    let second = picked.path().join("renamed-copy.mp4");
    tokio::fs::write(&first, b"identical payload").await.unwrap();
    tokio::fs::write(&second, b"identical payload").await.unwrap();

    let importer = MediaImporter::new(app_data.path(), "media");
    let v1 = importer.import_file(Some(&first)).await.unwrap().unwrap();
    let v2 = importer.import_file(Some(&second)).await.unwrap().unwrap();

    assert_eq!(v1, v2);
    assert_eq!(std::fs::read_dir(importer.cache_root()).unwrap().count(), 1);

    let env = resolver_for(app_data.path()).resolve(&format!("{BASE_ORIGIN}{v1}"), false);
    assert_eq!(env.status, 200);
    assert_eq!(env.body, b"identical payload");
}

#[tokio::test]
async fn unknown_media_request_is_404_not_index() {
    let app_data = tempdir().unwrap();
    let resolver = resolver_for(app_data.path());

    let env = resolver.handle(&format!("{BASE_ORIGIN}media/deadbeef.mp4"));
    assert_eq!(env.status, 404);
    assert!(env.body.is_empty());
    assert!(env.content_type.is_empty());
}

#[tokio::test]
async fn navigation_request_falls_back_to_index() {
    let app_data = tempdir().unwrap();
    let resolver = resolver_for(app_data.path());

    let env = resolver.handle(&format!("{BASE_ORIGIN}library/albums"));
    assert_eq!(env.status, 200);
    assert_eq!(env.content_type, "text/html");
    assert_eq!(env.body, b"<html>spa index</html>");
}

#[tokio::test]
async fn custom_path_request_bypasses_cache_and_host() {
    let app_data = tempdir().unwrap();
    let elsewhere = tempdir().unwrap();
    let file = elsewhere.path().join("direct.gif");
    tokio::fs::write(&file, b"GIF89a").await.unwrap();

    let resolver = resolver_for(app_data.path());
    let env = resolver.resolve(&format!("app://local-file{}", file.display()), false);

    assert_eq!(env.status, 200);
    assert_eq!(env.content_type, "image/gif");
    assert_eq!(env.body, b"GIF89a");
}
