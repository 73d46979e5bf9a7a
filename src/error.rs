//! Error taxonomy for the detection and crop pipeline
//!
//! Detection-side failures are split into a fatal configuration class and a
//! recoverable provider class; the orchestrator degrades the latter to the
//! fallback layout instead of surfacing them. Crop failures always surface.

use thiserror::Error;

/// Errors raised while resolving or invoking an OCR provider.
#[derive(Debug, Error)]
pub enum DetectError {
    /// Missing credential or otherwise unusable provider configuration.
    /// Fatal to the call; surfaced to the caller.
    #[error("provider configuration error: {0}")]
    Configuration(String),

    /// The selected provider is not installed or not configured on this
    /// device. Recovered by falling back to the default layout.
    #[error("ocr provider unavailable: {0}")]
    Unavailable(String),

    /// Transport-level failure talking to a remote provider.
    #[error("network error during text detection: {0}")]
    Network(String),

    /// The provider responded but the response was unusable.
    #[error("ocr provider error: {0}")]
    Provider(String),
}

impl DetectError {
    /// Whether the orchestrator may degrade to the fallback layout.
    /// Configuration problems must surface instead.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DetectError::Configuration(_))
    }
}

/// Errors raised while cropping the captured image to a selected region.
///
/// Unlike detection failures these are user-initiated actions and must be
/// reported, never silently skipped.
#[derive(Debug, Error)]
pub enum CropError {
    #[error("failed to load source image '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("crop rectangle ({x}, {y}) {width}x{height} lies outside a {image_width}x{image_height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("failed to write cropped image '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: image::ImageError,
    },
}
