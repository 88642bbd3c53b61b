use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::document::LocalizeOptions;
use crate::fetch::{FetchOptions, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::rewrite::{ReferenceSyntax, Rewriter};

/// Global configuration loaded from `~/.config/imglocal/config.toml`.
///
/// Every key is optional in the file; missing keys take the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImglocalConfig {
    /// Name of the images subdirectory, relative to the documents.
    pub images_dir: String,
    /// Name of the backup subdirectory, relative to the documents.
    pub backup_dir: String,
    /// Per-request timeout for image downloads, in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` sent with every image request.
    pub user_agent: String,
    /// Inject layout styles into documents whose stem is purely numeric.
    pub slide_styles: bool,
    /// Also rewrite CSS `url(...)` references, not only `<img src>`.
    pub css_urls: bool,
}

impl Default for ImglocalConfig {
    fn default() -> Self {
        Self {
            images_dir: "images".to_string(),
            backup_dir: "_old".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            slide_styles: true,
            css_urls: true,
        }
    }
}

impl ImglocalConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Builds the per-document options, resolving directory names against `root`.
    pub fn localize_options(&self, root: &Path) -> LocalizeOptions {
        let mut syntaxes = vec![ReferenceSyntax::ImgSrc];
        if self.css_urls {
            syntaxes.push(ReferenceSyntax::CssUrl);
        }
        LocalizeOptions {
            images_dir: root.join(&self.images_dir),
            backup_dir: root.join(&self.backup_dir),
            slide_styles: self.slide_styles,
            rewriter: Rewriter::new(syntaxes),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imglocal")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ImglocalConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Like [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<ImglocalConfig> {
    if !path.exists() {
        let default_cfg = ImglocalConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ImglocalConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
