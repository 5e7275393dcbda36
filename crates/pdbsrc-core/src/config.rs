use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Output format for verification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Global configuration loaded from `~/.config/pdbsrc/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdbsrcConfig {
    /// Directory recorded source paths are resolved against when
    /// `--source-root` is not given. None = resolve paths as recorded.
    #[serde(default)]
    pub source_root: Option<PathBuf>,
    /// Default report format for `verify`; the `--json` flag overrides it.
    #[serde(default)]
    pub report: Option<ReportFormat>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pdbsrc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PdbsrcConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PdbsrcConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PdbsrcConfig = toml::from_str(&data)?;
    Ok(cfg)
}
