//! Crop Executor
//!
//! Crops the captured image to a chosen detection box and encodes the
//! result. Crop failures surface to the caller; the crop is a confirmed
//! user action, unlike detection which degrades silently.

use image::codecs::jpeg::JpegEncoder;
use image::GenericImageView;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{CropFormat, CropSettings};
use crate::detect::DetectionBox;
use crate::error::CropError;

/// A cropped output image on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedImage {
    /// Path the encoded crop was written to
    pub path: PathBuf,
    /// Crop width in pixels
    pub width: u32,
    /// Crop height in pixels
    pub height: u32,
}

/// Crop `source` to the rectangle of `region` and write the encoded result
/// to `output`.
///
/// The rectangle is interpreted in the source image's pixel space. A
/// rectangle whose origin lies outside the image is an error; overhang past
/// the far edges is clamped.
pub fn crop_image(
    source: &Path,
    region: &DetectionBox,
    output: &Path,
    settings: &CropSettings,
) -> Result<CroppedImage, CropError> {
    let img = image::open(source).map_err(|e| CropError::Load {
        path: source.display().to_string(),
        source: e,
    })?;

    let (image_width, image_height) = img.dimensions();

    let x = region.x.round().max(0.0) as u32;
    let y = region.y.round().max(0.0) as u32;
    let width = (region.width.round() as u32).max(1);
    let height = (region.height.round() as u32).max(1);

    if x >= image_width || y >= image_height {
        return Err(CropError::OutOfBounds {
            x,
            y,
            width,
            height,
            image_width,
            image_height,
        });
    }

    let width = width.min(image_width - x);
    let height = height.min(image_height - y);

    let cropped = img.crop_imm(x, y, width, height);
    write_encoded(&cropped, output, settings)?;

    info!(
        "Cropped {}x{} region at ({}, {}) from {:?} to {:?}",
        width, height, x, y, source, output
    );

    Ok(CroppedImage {
        path: output.to_path_buf(),
        width,
        height,
    })
}

fn write_encoded(
    cropped: &image::DynamicImage,
    output: &Path,
    settings: &CropSettings,
) -> Result<(), CropError> {
    let wrap = |e: image::ImageError| CropError::Write {
        path: output.display().to_string(),
        source: e,
    };

    match settings.format {
        CropFormat::Jpeg => {
            let file = File::create(output)
                .map_err(|e| wrap(image::ImageError::IoError(e)))?;
            let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), settings.quality);
            // JPEG has no alpha channel
            cropped.to_rgb8().write_with_encoder(encoder).map_err(wrap)
        }
        CropFormat::Png => cropped
            .save_with_format(output, image::ImageFormat::Png)
            .map_err(wrap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn region(x: f32, y: f32, width: f32, height: f32) -> DetectionBox {
        DetectionBox {
            id: 1,
            x,
            y,
            width,
            height,
            text: String::new(),
            confidence: 1.0,
        }
    }

    fn png_settings() -> CropSettings {
        CropSettings {
            quality: 90,
            format: CropFormat::Png,
        }
    }

    fn write_test_image(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_pixel(width, height, Rgb([120, 80, 40]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_crop_full_image_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        let output = dir.path().join("crop.png");
        write_test_image(&source, 50, 40);

        // Rectangle equal to the image itself keeps its dimensions
        let result = crop_image(&source, &region(0.0, 0.0, 50.0, 40.0), &output, &png_settings())
            .unwrap();

        assert_eq!(result.width, 50);
        assert_eq!(result.height, 40);
        let (w, h) = image::image_dimensions(&output).unwrap();
        assert_eq!((w, h), (50, 40));
    }

    #[test]
    fn test_crop_inner_region() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        let output = dir.path().join("crop.png");
        write_test_image(&source, 100, 80);

        let result = crop_image(&source, &region(10.0, 20.0, 30.0, 15.0), &output, &png_settings())
            .unwrap();

        assert_eq!(result.width, 30);
        assert_eq!(result.height, 15);
    }

    #[test]
    fn test_crop_clamps_overhang() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        let output = dir.path().join("crop.png");
        write_test_image(&source, 100, 80);

        let result = crop_image(&source, &region(90.0, 70.0, 50.0, 50.0), &output, &png_settings())
            .unwrap();

        assert_eq!(result.width, 10);
        assert_eq!(result.height, 10);
    }

    #[test]
    fn test_crop_origin_outside_image_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        let output = dir.path().join("crop.png");
        write_test_image(&source, 100, 80);

        let err = crop_image(&source, &region(200.0, 0.0, 10.0, 10.0), &output, &png_settings())
            .unwrap_err();

        assert!(matches!(err, CropError::OutOfBounds { .. }));
    }

    #[test]
    fn test_crop_missing_source_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("crop.png");

        let err = crop_image(
            Path::new("/nonexistent/source.png"),
            &region(0.0, 0.0, 10.0, 10.0),
            &output,
            &png_settings(),
        )
        .unwrap_err();

        assert!(matches!(err, CropError::Load { .. }));
    }

    #[test]
    fn test_crop_jpeg_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        let output = dir.path().join("crop.jpg");
        write_test_image(&source, 60, 60);

        let settings = CropSettings {
            quality: 80,
            format: CropFormat::Jpeg,
        };
        let result = crop_image(&source, &region(5.0, 5.0, 20.0, 20.0), &output, &settings)
            .unwrap();

        assert_eq!(result.width, 20);
        assert_eq!(result.height, 20);
        let (w, h) = image::image_dimensions(&output).unwrap();
        assert_eq!((w, h), (20, 20));
    }
}
