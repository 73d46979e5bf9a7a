//! OCR provider contract
//!
//! One capability: extract raw text blocks from an image reference. Each
//! provider declares the coordinate convention its bounds use, so the
//! normalizer never has to guess between fractions and pixels.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{AppConfig, ProviderKind};
use crate::error::DetectError;

use super::cloud::CloudProvider;
use super::local::LocalProvider;
use super::mock::MockProvider;

/// Coordinate convention a provider's bounds are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateUnits {
    /// Fractions of the image in [0, 1]
    Normalized,
    /// Absolute pixels in the source image
    Pixel,
}

/// Bounds as reported by a provider. Field names vary between providers
/// (`left`/`x`, `top`/`y`, explicit size or `right`/`bottom` edges), so
/// everything is optional here and resolved by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawBounds {
    #[serde(default, alias = "left")]
    pub x: Option<f32>,
    #[serde(default, alias = "top")]
    pub y: Option<f32>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub right: Option<f32>,
    #[serde(default)]
    pub bottom: Option<f32>,
}

/// One raw text block from a provider, before normalization.
/// Ephemeral: exists only during a detection pass.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTextBlock {
    #[serde(default)]
    pub text: String,
    /// Some providers report under `boundingBox`...
    #[serde(default, alias = "boundingBox")]
    pub bounding_box: Option<RawBounds>,
    /// ...others under `frame`
    #[serde(default)]
    pub frame: Option<RawBounds>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl RawTextBlock {
    /// The bounds record to normalize, whichever container the provider used
    pub fn bounds(&self) -> Option<&RawBounds> {
        self.bounding_box.as_ref().or(self.frame.as_ref())
    }
}

/// A pluggable text-detection backend
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Detect text blocks in the referenced image
    async fn detect_blocks(&self, image_uri: &str) -> Result<Vec<RawTextBlock>, DetectError>;

    /// Coordinate convention for this provider's bounds
    fn units(&self) -> CoordinateUnits;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

impl std::fmt::Debug for dyn OcrProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrProvider").field("name", &self.name()).finish()
    }
}

/// Resolve the configured provider.
///
/// A missing credential for the chosen provider surfaces here, at call
/// time, as [`DetectError::Configuration`].
pub fn resolve_provider(config: &AppConfig) -> Result<Box<dyn OcrProvider>, DetectError> {
    match config.provider {
        ProviderKind::Mock => Ok(Box::new(MockProvider::new())),
        ProviderKind::Cloud => {
            let api_key = config
                .cloud
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .ok_or_else(|| {
                    DetectError::Configuration(
                        "cloud provider selected but no API key configured".to_string(),
                    )
                })?;

            Ok(Box::new(CloudProvider::new(
                api_key,
                config.cloud.endpoint.clone(),
                config.cloud.max_results,
            )))
        }
        ProviderKind::Local => Ok(Box::new(LocalProvider::new(config.local.engine_dir.clone()))),
    }
}
