//! Captured image reference

/// A photo taken by the capture collaborator.
///
/// The bytes stay with the host platform; this carries only the opaque
/// reference and the reported dimensions. Created once per shutter press,
/// immutable, discarded on retake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// Opaque reference to the image bytes (a file path for `FileCamera`)
    pub uri: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl CapturedImage {
    /// Create a new captured image reference
    pub fn new(uri: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            uri: uri.into(),
            width,
            height,
        }
    }

    /// Get image dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the reported geometry is usable for detection
    pub fn has_valid_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let img = CapturedImage::new("file:///tmp/photo.jpg", 400, 800);
        assert_eq!(img.dimensions(), (400, 800));
        assert!(img.has_valid_dimensions());
    }

    #[test]
    fn test_zero_dimension_is_invalid() {
        let img = CapturedImage::new("file:///tmp/photo.jpg", 0, 800);
        assert!(!img.has_valid_dimensions());
    }
}
