//! Application Configuration
//!
//! Provider selection and per-provider settings stored in TOML format.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which OCR provider the detector should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Deterministic canned blocks, for development and tests
    #[default]
    Mock,
    /// Remote vision API over HTTP
    Cloud,
    /// On-device recognizer (may not be installed)
    Local,
}

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Selected OCR provider
    pub provider: ProviderKind,
    /// Detection settings shared by all providers
    pub detection: DetectionSettings,
    /// Cloud provider settings
    pub cloud: CloudSettings,
    /// Local provider settings
    pub local: LocalSettings,
    /// Crop output settings
    pub crop: CropSettings,
}

/// Settings shared by every detection pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionSettings {
    /// Upper bound on a single provider call, in seconds.
    /// Expiry is treated as a provider failure.
    pub timeout_secs: u64,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self { timeout_secs: 15 }
    }
}

/// Cloud provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudSettings {
    /// API key for the remote vision service. Required when the cloud
    /// provider is selected; checked at call time, not startup.
    pub api_key: Option<String>,
    /// Annotation endpoint base URL
    pub endpoint: String,
    /// Maximum text annotations to request per image
    pub max_results: u32,
}

impl Default for CloudSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://vision.googleapis.com/v1/images:annotate".to_string(),
            max_results: 10,
        }
    }
}

/// Local provider settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalSettings {
    /// Directory holding the on-device recognizer models, if installed
    pub engine_dir: Option<PathBuf>,
}

/// Crop output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropSettings {
    /// JPEG quality (1-100), ignored for PNG output
    pub quality: u8,
    /// Output format for cropped images
    pub format: CropFormat,
}

/// Encoding format for cropped output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropFormat {
    #[default]
    Jpeg,
    Png,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            quality: 90,
            format: CropFormat::Jpeg,
        }
    }
}

/// Get the default configuration file path
pub fn default_config_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "cashea", "snapcrop")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir.join("config.toml"))
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
