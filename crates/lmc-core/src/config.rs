use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Webview capabilities resolved once at startup by the platform adapter and
/// passed into view construction as plain data. The core never does runtime
/// OS-version checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebViewCapabilities {
    /// Inline media playback (must be set at webview creation).
    pub allows_inline_media_playback: bool,
    /// Picture-in-picture playback.
    pub allows_picture_in_picture: bool,
    /// Autoplay without a user gesture.
    pub media_autoplay_without_user_action: bool,
    /// Web inspector / developer extras.
    pub developer_tools_enabled: bool,
}

impl Default for WebViewCapabilities {
    fn default() -> Self {
        Self {
            allows_inline_media_playback: true,
            allows_picture_in_picture: true,
            media_autoplay_without_user_action: true,
            developer_tools_enabled: false,
        }
    }
}

/// Global configuration loaded from `~/.config/lmc/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LmcConfig {
    /// URL scheme the webview intercepts (without `://`).
    pub scheme: String,
    /// Host part of the app origin.
    pub host: String,
    /// Directory name under the app data root holding the managed cache; also
    /// the first segment of every virtual path.
    pub cache_dir_name: String,
    /// Staging areas (e.g. the file picker's temp dir); sources under these
    /// are moved into the cache instead of copied.
    #[serde(default)]
    pub transient_dirs: Vec<PathBuf>,
    /// URL prefixes mapped directly to absolute filesystem paths, checked in
    /// order before any other resolution.
    #[serde(default)]
    pub custom_path_prefixes: Vec<String>,
    /// Webview capabilities handed to view construction.
    #[serde(default)]
    pub webview: WebViewCapabilities,
}

impl Default for LmcConfig {
    fn default() -> Self {
        Self {
            scheme: "app".to_string(),
            host: "0.0.0.0".to_string(),
            cache_dir_name: "media".to_string(),
            transient_dirs: Vec::new(),
            custom_path_prefixes: Vec::new(),
            webview: WebViewCapabilities::default(),
        }
    }
}

impl LmcConfig {
    /// Origin the webview treats as the app root, e.g. `app://0.0.0.0/`.
    pub fn base_origin(&self) -> String {
        format!("{}://{}/", self.scheme, self.host)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("lmc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LmcConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LmcConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: LmcConfig = toml::from_str(&data)?;
    Ok(cfg)
}
