//! Local OCR provider
//!
//! Slot for an on-device recognizer supplied by the host platform. The
//! recognizer may be missing entirely; the provider must discover that
//! immediately and fail with [`DetectError::Unavailable`] rather than hang,
//! so the orchestrator can fall back without waiting.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::error::DetectError;

use super::provider::{CoordinateUnits, OcrProvider, RawTextBlock};

/// An installed on-device recognizer. The host platform injects an
/// implementation when one exists; tests inject fakes.
#[async_trait]
pub trait LocalEngine: Send + Sync {
    /// Recognize text blocks in the referenced image
    async fn recognize(&self, image_uri: &str) -> Result<Vec<RawTextBlock>, DetectError>;
}

/// On-device recognizer provider
pub struct LocalProvider {
    engine_dir: Option<PathBuf>,
    engine: Option<Box<dyn LocalEngine>>,
}

impl LocalProvider {
    /// Create a local provider with no injected engine. Detection will
    /// report the recognizer as unavailable.
    pub fn new(engine_dir: Option<PathBuf>) -> Self {
        Self {
            engine_dir,
            engine: None,
        }
    }

    /// Create a local provider backed by an installed engine
    pub fn with_engine(engine_dir: Option<PathBuf>, engine: Box<dyn LocalEngine>) -> Self {
        Self {
            engine_dir,
            engine: Some(engine),
        }
    }

    /// Availability probe. Runs before any recognition work so an
    /// unconfigured device fails fast.
    fn installed_engine(&self) -> Result<&dyn LocalEngine, DetectError> {
        let dir = self.engine_dir.as_ref().ok_or_else(|| {
            DetectError::Unavailable("no on-device engine directory configured".to_string())
        })?;

        if !dir.is_dir() {
            return Err(DetectError::Unavailable(format!(
                "engine directory {dir:?} does not exist"
            )));
        }

        self.engine.as_deref().ok_or_else(|| {
            DetectError::Unavailable("no on-device recognizer installed".to_string())
        })
    }
}

#[async_trait]
impl OcrProvider for LocalProvider {
    async fn detect_blocks(&self, image_uri: &str) -> Result<Vec<RawTextBlock>, DetectError> {
        let engine = self.installed_engine()?;
        debug!("Local OCR: delegating to on-device recognizer");
        engine.recognize(image_uri).await
    }

    fn units(&self) -> CoordinateUnits {
        CoordinateUnits::Pixel
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::provider::RawBounds;

    struct FakeEngine;

    #[async_trait]
    impl LocalEngine for FakeEngine {
        async fn recognize(&self, _image_uri: &str) -> Result<Vec<RawTextBlock>, DetectError> {
            Ok(vec![RawTextBlock {
                text: "on device".to_string(),
                bounding_box: Some(RawBounds {
                    x: Some(10.0),
                    y: Some(20.0),
                    width: Some(30.0),
                    height: Some(15.0),
                    ..Default::default()
                }),
                frame: None,
                confidence: Some(0.8),
            }])
        }
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_unavailable() {
        let provider = LocalProvider::new(None);
        let err = provider.detect_blocks("photo.jpg").await.unwrap_err();

        assert!(matches!(err, DetectError::Unavailable(_)));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_missing_engine_dir_is_unavailable() {
        let provider = LocalProvider::new(Some(PathBuf::from("/nonexistent/engine")));
        let err = provider.detect_blocks("photo.jpg").await.unwrap_err();

        assert!(matches!(err, DetectError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_configured_dir_without_engine_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalProvider::new(Some(dir.path().to_path_buf()));

        let err = provider.detect_blocks("photo.jpg").await.unwrap_err();
        assert!(matches!(err, DetectError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_injected_engine_runs() {
        let dir = tempfile::tempdir().unwrap();
        let provider =
            LocalProvider::with_engine(Some(dir.path().to_path_buf()), Box::new(FakeEngine));

        let blocks = provider.detect_blocks("photo.jpg").await.unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "on device");
    }
}
