//! Mock OCR provider
//!
//! Returns a fixed set of text blocks after a simulated processing delay.
//! Used for development and tests; never fails and never touches the image.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::DetectError;

use super::provider::{CoordinateUnits, OcrProvider, RawBounds, RawTextBlock};

/// Simulated processing delay per detection pass
const MOCK_DELAY: Duration = Duration::from_millis(150);

/// Deterministic canned-output provider
#[derive(Debug)]
pub struct MockProvider {
    delay: Duration,
}

impl MockProvider {
    /// Create a mock provider with the default simulated delay
    pub fn new() -> Self {
        Self { delay: MOCK_DELAY }
    }

    /// Create a mock provider with a custom delay (zero in tests)
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// The fixture blocks every detection pass returns
    fn fixture() -> Vec<RawTextBlock> {
        vec![
            fixture_block("Math Problem: 2x + 5 = 15", 50.0, 100.0, 250.0, 40.0, 0.95),
            fixture_block("Solve for x", 50.0, 150.0, 120.0, 30.0, 0.92),
            fixture_block("Show your work below:", 50.0, 200.0, 200.0, 25.0, 0.88),
        ]
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn fixture_block(text: &str, x: f32, y: f32, width: f32, height: f32, confidence: f32) -> RawTextBlock {
    RawTextBlock {
        text: text.to_string(),
        bounding_box: Some(RawBounds {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }),
        frame: None,
        confidence: Some(confidence),
    }
}

#[async_trait]
impl OcrProvider for MockProvider {
    async fn detect_blocks(&self, _image_uri: &str) -> Result<Vec<RawTextBlock>, DetectError> {
        tokio::time::sleep(self.delay).await;
        Ok(Self::fixture())
    }

    fn units(&self) -> CoordinateUnits {
        CoordinateUnits::Pixel
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
