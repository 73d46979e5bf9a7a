//! Text-Region Detection Layer
//!
//! Runs the configured OCR provider against a captured image and turns
//! whatever comes back into canonical pixel-space detection boxes. Provider
//! failures never reach the caller: the pass degrades to a fixed two-box
//! fallback layout so the capture flow stays usable.

pub mod cloud;
pub mod local;
pub mod mock;
pub mod normalize;
pub mod provider;
pub mod select;

use std::time::Duration;
use tracing::{debug, warn};

use crate::capture::CapturedImage;
use crate::config::AppConfig;
use crate::error::DetectError;

pub use local::LocalEngine;
pub use normalize::{normalize_block, UNKNOWN_CONFIDENCE};
pub use provider::{resolve_provider, CoordinateUnits, OcrProvider, RawBounds, RawTextBlock};
pub use select::largest_box;

/// Canvas used for the fallback layout when the image geometry is unknown
pub const MIN_CANVAS_WIDTH: f32 = 320.0;
pub const MIN_CANVAS_HEIGHT: f32 = 480.0;

/// A detected text region in source-image pixel space.
///
/// Ids are unique within one detection pass and follow provider emission
/// order; the whole set is replaced on every new capture.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionBox {
    /// 1-based id in emission order
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Always >= 1
    pub width: f32,
    /// Always >= 1
    pub height: f32,
    /// Recognized text, may be empty
    pub text: String,
    /// Confidence in [0, 1]
    pub confidence: f32,
}

impl DetectionBox {
    /// Region area, the default-selection criterion
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Detection orchestrator: provider call, normalization and fallback.
pub struct Detector {
    config: AppConfig,
}

impl Detector {
    /// Create a detector for the given configuration
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run one detection pass against a captured image.
    ///
    /// The only error that escapes is [`DetectError::Configuration`]
    /// (unusable provider setup, surfaced at call time). Every runtime
    /// provider failure degrades to the fallback layout; zero detected
    /// blocks is a legitimate empty result, not a failure.
    pub async fn detect(&self, image: &CapturedImage) -> Result<Vec<DetectionBox>, DetectError> {
        if !image.has_valid_dimensions() {
            warn!(
                width = image.width,
                height = image.height,
                "invalid capture geometry, using minimum-canvas fallback layout"
            );
            return Ok(fallback_layout(MIN_CANVAS_WIDTH, MIN_CANVAS_HEIGHT));
        }

        let provider = resolve_provider(&self.config)?;
        Ok(self.run_provider(provider.as_ref(), image).await)
    }

    /// Invoke one provider under the configured timeout and normalize its
    /// output. Infallible by construction: failures become the fallback.
    pub async fn run_provider(
        &self,
        provider: &dyn OcrProvider,
        image: &CapturedImage,
    ) -> Vec<DetectionBox> {
        let width = image.width as f32;
        let height = image.height as f32;
        let timeout = Duration::from_secs(self.config.detection.timeout_secs);

        let blocks = match tokio::time::timeout(timeout, provider.detect_blocks(&image.uri)).await {
            Ok(Ok(blocks)) => blocks,
            Ok(Err(err)) => {
                warn!(
                    provider = provider.name(),
                    error = %err,
                    "text detection failed, using fallback layout"
                );
                return fallback_layout(width, height);
            }
            Err(_) => {
                warn!(
                    provider = provider.name(),
                    timeout_secs = self.config.detection.timeout_secs,
                    "text detection timed out, using fallback layout"
                );
                return fallback_layout(width, height);
            }
        };

        if blocks.is_empty() {
            debug!(provider = provider.name(), "no text found");
            return vec![];
        }

        debug!(
            provider = provider.name(),
            count = blocks.len(),
            "normalizing detected blocks"
        );

        blocks
            .iter()
            .enumerate()
            .map(|(index, block)| normalize_block(block, index, width, height, provider.units()))
            .collect()
    }
}

/// The fixed two-box layout used when detection cannot run or fails.
///
/// Two proportional regions, one in the upper part of the canvas and one
/// lower down, so the user can still pick a crop area by hand.
pub fn fallback_layout(width: f32, height: f32) -> Vec<DetectionBox> {
    vec![
        DetectionBox {
            id: 1,
            x: 0.1 * width,
            y: 0.15 * height,
            width: (0.8 * width).max(1.0),
            height: (0.25 * height).max(1.0),
            text: String::new(),
            confidence: 0.0,
        },
        DetectionBox {
            id: 2,
            x: 0.1 * width,
            y: 0.55 * height,
            width: (0.8 * width).max(1.0),
            height: (0.2 * height).max(1.0),
            text: String::new(),
            confidence: 0.0,
        },
    ]
}
