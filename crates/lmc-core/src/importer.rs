//! Content-addressed media import.
//!
//! Each imported file is stored once under `{cache_root}/{md5}{ext}`; a
//! second import of identical bytes finds the entry already present and
//! skips the copy. Sources under a transient staging area (e.g. the platform
//! file picker's temp dir) are moved instead of copied.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

use crate::fingerprint;

const COPY_BUF_SIZE: usize = 1024 * 1024;

/// Temporary suffix for in-flight copies, renamed into place on completion.
const TEMP_SUFFIX: &str = ".part";

/// Path for the in-flight copy: appends `.part` to the entry path.
fn temp_path(target: &Path) -> PathBuf {
    let mut o = target.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Error importing a media file into the cache. Import failures belong to the
/// UI flow that triggered them and never reach the request-serving path.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Source file missing or unreadable. No cache entry is created.
    #[error("failed to read source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Cache directory or entry could not be created/written (permissions,
    /// disk full). No media will be servable until this is resolved.
    #[error("failed to write cache entry {path}: {source}")]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ImportError {
    fn source_io(path: &Path, source: std::io::Error) -> Self {
        ImportError::Source {
            path: path.to_path_buf(),
            source,
        }
    }

    fn dest_io(path: &Path, source: std::io::Error) -> Self {
        ImportError::Destination {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Importer for one managed cache directory.
///
/// The cache lives at `{app_data_root}/{cache_dir_name}`; returned virtual
/// paths are `{cache_dir_name}/{md5}{ext}`, forward-slash separated, relative
/// to the mount point the host assigns to the app data root.
#[derive(Debug, Clone)]
pub struct MediaImporter {
    cache_root: PathBuf,
    cache_dir_name: String,
    transient_roots: Vec<PathBuf>,
}

impl MediaImporter {
    pub fn new(app_data_root: impl Into<PathBuf>, cache_dir_name: impl Into<String>) -> Self {
        let cache_dir_name = cache_dir_name.into();
        let cache_root = app_data_root.into().join(&cache_dir_name);
        Self {
            cache_root,
            cache_dir_name,
            transient_roots: Vec::new(),
        }
    }

    /// Directories whose files need not survive an import: sources under any
    /// of these are moved into the cache rather than copied.
    pub fn with_transient_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.transient_roots = roots;
        self
    }

    /// Physical directory holding the cache entries.
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Import `source` into the cache and return the virtual path to embed in
    /// markup, or `None` when there is nothing to import (`None`/empty path).
    ///
    /// Identical bytes always yield the same virtual path, and at most one
    /// physical copy exists per fingerprint+extension pair. Concurrent imports
    /// of the same content are not serialized; a copy or move that loses the
    /// race is treated as success because the winner wrote the same bytes.
    pub async fn import_file(&self, source: Option<&Path>) -> Result<Option<String>, ImportError> {
        let source = match source {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => return Ok(None),
        };

        let mut file = fs::File::open(source)
            .await
            .map_err(|e| ImportError::source_io(source, e))?;
        let digest = fingerprint::md5_stream(&mut file)
            .await
            .map_err(|e| ImportError::source_io(source, e))?;

        let entry_name = match source.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", digest, ext),
            None => digest,
        };
        let target = self.cache_root.join(&entry_name);

        let exists = fs::try_exists(&target)
            .await
            .map_err(|e| ImportError::dest_io(&target, e))?;
        if !exists {
            self.place(source, file, &target).await?;
            tracing::debug!(
                source = %source.display(),
                target = %target.display(),
                "imported media file"
            );
        } else {
            tracing::debug!(target = %target.display(), "cache entry already present, skipping copy");
        }

        Ok(Some(format!("{}/{}", self.cache_dir_name, entry_name)))
    }

    fn is_transient(&self, source: &Path) -> bool {
        self.transient_roots.iter().any(|r| source.starts_with(r))
    }

    /// Put the source bytes at `target`, by rename when the source is
    /// transient, else by rewinding the digest-pass handle and copying.
    async fn place(
        &self,
        source: &Path,
        digest_pass: fs::File,
        target: &Path,
    ) -> Result<(), ImportError> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ImportError::dest_io(parent, e))?;
        }

        let result = if self.is_transient(source) {
            drop(digest_pass);
            fs::rename(source, target).await
        } else {
            self.copy_into(digest_pass, target).await
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                // A concurrent import of the same content may have landed
                // first; the bytes are identical, so the existing entry wins.
                if fs::try_exists(target).await.unwrap_or(false) {
                    tracing::debug!(target = %target.display(), "lost import race, entry already complete");
                    Ok(())
                } else {
                    Err(ImportError::dest_io(target, e))
                }
            }
        }
    }

    /// Copy into a temp name and rename into place, so a failed copy can
    /// never truncate an entry a concurrent import already completed.
    async fn copy_into(&self, mut reader: fs::File, target: &Path) -> std::io::Result<()> {
        // The digest pass consumed the stream; rewind before copying.
        reader.seek(SeekFrom::Start(0)).await?;

        let tmp = temp_path(target);
        let mut out = fs::File::create(&tmp).await?;
        if let Err(e) = copy_loop(&mut reader, &mut out).await {
            drop(out);
            let _ = fs::remove_file(&tmp).await;
            return Err(e);
        }
        drop(out);

        if let Err(e) = fs::rename(&tmp, target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e);
        }
        Ok(())
    }
}

async fn copy_loop(reader: &mut fs::File, out: &mut fs::File) -> std::io::Result<()> {
    let mut buf = vec![0u8; COPY_BUF_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n]).await?;
    }
    out.flush().await
}
