//! Image Capture Layer
//!
//! Contracts for the host camera collaborator. The actual camera hardware,
//! permission prompts and preview rendering live in the host platform; this
//! layer only models what a capture must hand back and the sensor/flash
//! toggles the capture screen exposes.

pub mod photo;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

pub use photo::CapturedImage;

/// Which sensor the camera uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl CameraFacing {
    /// Switch between front and back sensor
    pub fn toggle(self) -> Self {
        match self {
            CameraFacing::Back => CameraFacing::Front,
            CameraFacing::Front => CameraFacing::Back,
        }
    }
}

/// Flash mode for the next capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashMode {
    #[default]
    Off,
    On,
    Auto,
}

impl FlashMode {
    /// Cycle off -> on -> auto -> off
    pub fn cycle(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Auto,
            FlashMode::Auto => FlashMode::Off,
        }
    }
}

/// Host camera contract. One shutter press produces one immutable
/// [`CapturedImage`]; retake discards it and takes another.
#[async_trait]
pub trait Camera: Send + Sync {
    /// Take a photo and return its reference plus dimensions
    async fn take_picture(&self) -> Result<CapturedImage>;

    /// Current sensor
    fn facing(&self) -> CameraFacing;

    /// Switch sensor for subsequent captures
    fn set_facing(&mut self, facing: CameraFacing);

    /// Current flash mode
    fn flash(&self) -> FlashMode;

    /// Set flash mode for subsequent captures
    fn set_flash(&mut self, flash: FlashMode);
}

/// Camera backed by an image file on disk. Used by the CLI and tests;
/// "taking a picture" probes the file's real dimensions.
#[derive(Debug)]
pub struct FileCamera {
    path: PathBuf,
    facing: CameraFacing,
    flash: FlashMode,
}

impl FileCamera {
    /// Create a file camera for the given image path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            facing: CameraFacing::default(),
            flash: FlashMode::default(),
        }
    }
}

#[async_trait]
impl Camera for FileCamera {
    async fn take_picture(&self) -> Result<CapturedImage> {
        let (width, height) = image::image_dimensions(&self.path)
            .with_context(|| format!("failed to read image dimensions from {:?}", self.path))?;

        Ok(CapturedImage::new(
            self.path.to_string_lossy().into_owned(),
            width,
            height,
        ))
    }

    fn facing(&self) -> CameraFacing {
        self.facing
    }

    fn set_facing(&mut self, facing: CameraFacing) {
        self.facing = facing;
    }

    fn flash(&self) -> FlashMode {
        self.flash
    }

    fn set_flash(&mut self, flash: FlashMode) {
        self.flash = flash;
    }
}
