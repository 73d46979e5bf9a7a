//! Coordinate normalization
//!
//! Converts a provider's raw bounds, whatever field names and units it
//! used, into a canonical pixel-space rectangle relative to the captured
//! image. Missing fields fall back to a fixed default region.

use super::provider::{CoordinateUnits, RawBounds, RawTextBlock};
use super::DetectionBox;

/// Default region when a provider omits bounds, as fractions of the image
const DEFAULT_X_FRACTION: f32 = 0.1;
const DEFAULT_Y_FRACTION: f32 = 0.2;
const DEFAULT_WIDTH_FRACTION: f32 = 0.8;
const DEFAULT_HEIGHT_FRACTION: f32 = 0.15;

/// Sentinel for blocks whose provider reported no confidence.
///
/// Fixed stand-in for an "unknown quality" signal; deliberately not a
/// random value so detection passes are reproducible.
pub const UNKNOWN_CONFIDENCE: f32 = 0.5;

/// Normalize one raw block into a canonical detection box.
///
/// `index` is the provider emission index; ids are `index + 1` so a pass
/// over `n` blocks yields ids `1..=n` in emission order.
pub fn normalize_block(
    block: &RawTextBlock,
    index: usize,
    image_width: f32,
    image_height: f32,
    units: CoordinateUnits,
) -> DetectionBox {
    let bounds = block.bounds();

    let x = resolve(
        bounds.and_then(|b| b.x),
        units,
        image_width,
        DEFAULT_X_FRACTION,
    );
    let y = resolve(
        bounds.and_then(|b| b.y),
        units,
        image_height,
        DEFAULT_Y_FRACTION,
    );
    let width = resolve(
        bounds.and_then(extent_x),
        units,
        image_width,
        DEFAULT_WIDTH_FRACTION,
    );
    let height = resolve(
        bounds.and_then(extent_y),
        units,
        image_height,
        DEFAULT_HEIGHT_FRACTION,
    );

    let confidence = block
        .confidence
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(UNKNOWN_CONFIDENCE);

    DetectionBox {
        id: index as u32 + 1,
        x: x.max(0.0),
        y: y.max(0.0),
        width: width.max(1.0),
        height: height.max(1.0),
        text: block.text.clone(),
        confidence,
    }
}

/// Explicit width, else derived from the right edge
fn extent_x(bounds: &RawBounds) -> Option<f32> {
    bounds
        .width
        .or_else(|| match (bounds.right, bounds.x) {
            (Some(right), Some(left)) => Some(right - left),
            _ => None,
        })
}

/// Explicit height, else derived from the bottom edge
fn extent_y(bounds: &RawBounds) -> Option<f32> {
    bounds
        .height
        .or_else(|| match (bounds.bottom, bounds.y) {
            (Some(bottom), Some(top)) => Some(bottom - top),
            _ => None,
        })
}

/// Scale a provider value into pixel space per its declared units, or
/// apply the default fraction of the image when the value is missing.
fn resolve(value: Option<f32>, units: CoordinateUnits, dimension: f32, default_fraction: f32) -> f32 {
    match value {
        Some(v) => match units {
            CoordinateUnits::Normalized => v * dimension,
            CoordinateUnits::Pixel => v,
        },
        None => default_fraction * dimension,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_block(x: f32, y: f32, width: f32, height: f32) -> RawTextBlock {
        RawTextBlock {
            text: "sample".to_string(),
            bounding_box: Some(RawBounds {
                x: Some(x),
                y: Some(y),
                width: Some(width),
                height: Some(height),
                ..Default::default()
            }),
            frame: None,
            confidence: Some(0.9),
        }
    }

    #[test]
    fn test_pixel_units_pass_through() {
        let block = pixel_block(50.0, 100.0, 250.0, 40.0);
        let result = normalize_block(&block, 0, 400.0, 800.0, CoordinateUnits::Pixel);

        assert_eq!(result.id, 1);
        assert_eq!(result.x, 50.0);
        assert_eq!(result.y, 100.0);
        assert_eq!(result.width, 250.0);
        assert_eq!(result.height, 40.0);
        assert_eq!(result.text, "sample");
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_normalized_units_scale_by_image() {
        let block = RawTextBlock {
            bounding_box: Some(RawBounds {
                x: Some(0.25),
                y: Some(0.5),
                width: Some(0.5),
                height: Some(0.1),
                ..Default::default()
            }),
            ..Default::default()
        };

        let result = normalize_block(&block, 0, 400.0, 800.0, CoordinateUnits::Normalized);
        assert_eq!(result.x, 100.0);
        assert_eq!(result.y, 400.0);
        assert_eq!(result.width, 200.0);
        assert_eq!(result.height, 80.0);
    }

    #[test]
    fn test_missing_bounds_use_default_fractions() {
        let block = RawTextBlock::default();
        let result = normalize_block(&block, 2, 400.0, 800.0, CoordinateUnits::Pixel);

        assert_eq!(result.id, 3);
        assert!((result.x - 40.0).abs() < f32::EPSILON);
        assert!((result.y - 160.0).abs() < f32::EPSILON);
        assert!((result.width - 320.0).abs() < f32::EPSILON);
        assert!((result.height - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_size_derived_from_edges() {
        let block = RawTextBlock {
            frame: Some(RawBounds {
                x: Some(10.0),
                y: Some(20.0),
                right: Some(110.0),
                bottom: Some(60.0),
                ..Default::default()
            }),
            ..Default::default()
        };

        let result = normalize_block(&block, 0, 400.0, 800.0, CoordinateUnits::Pixel);
        assert_eq!(result.width, 100.0);
        assert_eq!(result.height, 40.0);
    }

    #[test]
    fn test_explicit_size_wins_over_edges() {
        let block = RawTextBlock {
            bounding_box: Some(RawBounds {
                x: Some(0.0),
                y: Some(0.0),
                width: Some(50.0),
                height: Some(25.0),
                right: Some(999.0),
                bottom: Some(999.0),
            }),
            ..Default::default()
        };

        let result = normalize_block(&block, 0, 400.0, 800.0, CoordinateUnits::Pixel);
        assert_eq!(result.width, 50.0);
        assert_eq!(result.height, 25.0);
    }

    #[test]
    fn test_negative_origin_clamps_to_zero() {
        let block = pixel_block(-12.0, -3.0, 40.0, 20.0);
        let result = normalize_block(&block, 0, 400.0, 800.0, CoordinateUnits::Pixel);

        assert_eq!(result.x, 0.0);
        assert_eq!(result.y, 0.0);
    }

    #[test]
    fn test_degenerate_size_clamps_to_one() {
        let block = pixel_block(10.0, 10.0, 0.0, -5.0);
        let result = normalize_block(&block, 0, 400.0, 800.0, CoordinateUnits::Pixel);

        assert_eq!(result.width, 1.0);
        assert_eq!(result.height, 1.0);
    }

    #[test]
    fn test_missing_confidence_uses_sentinel() {
        let mut block = pixel_block(10.0, 10.0, 20.0, 20.0);
        block.confidence = None;

        let result = normalize_block(&block, 0, 400.0, 800.0, CoordinateUnits::Pixel);
        assert_eq!(result.confidence, UNKNOWN_CONFIDENCE);
    }

    #[test]
    fn test_out_of_range_confidence_is_clamped() {
        let mut block = pixel_block(10.0, 10.0, 20.0, 20.0);
        block.confidence = Some(1.7);

        let result = normalize_block(&block, 0, 400.0, 800.0, CoordinateUnits::Pixel);
        assert_eq!(result.confidence, 1.0);
    }
}
