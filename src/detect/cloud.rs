//! Cloud OCR provider
//!
//! Sends the image to a Vision-style `images:annotate` endpoint and parses
//! the text annotations it returns. Transport failures map to
//! [`DetectError::Network`], unusable responses to [`DetectError::Provider`].

use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DetectError;

use super::provider::{CoordinateUnits, OcrProvider, RawBounds, RawTextBlock};

/// Remote vision API provider
pub struct CloudProvider {
    api_key: String,
    endpoint: String,
    max_results: u32,
    client: reqwest::Client,
}

impl CloudProvider {
    /// Create a cloud provider with the given credential and endpoint
    pub fn new(api_key: String, endpoint: String, max_results: u32) -> Self {
        Self {
            api_key,
            endpoint,
            max_results,
            client: reqwest::Client::new(),
        }
    }

    fn build_request(&self, image_base64: String) -> AnnotateRequest {
        AnnotateRequest {
            requests: vec![AnnotationRequest {
                image: ImageContent {
                    content: image_base64,
                },
                features: vec![Feature {
                    feature_type: "TEXT_DETECTION".to_string(),
                    max_results: self.max_results,
                }],
            }],
        }
    }
}

#[async_trait]
impl OcrProvider for CloudProvider {
    async fn detect_blocks(&self, image_uri: &str) -> Result<Vec<RawTextBlock>, DetectError> {
        let path = image_uri.strip_prefix("file://").unwrap_or(image_uri);
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            DetectError::Provider(format!("failed to read image '{path}': {e}"))
        })?;

        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        debug!("Cloud OCR: sending {} base64 bytes", encoded.len());

        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(&self.build_request(encoded))
            .send()
            .await
            .map_err(|e| DetectError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DetectError::Provider(format!(
                "annotate request failed with status {status}"
            )));
        }

        let body: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| DetectError::Provider(format!("malformed annotate response: {e}")))?;

        let blocks = parse_response(body);
        debug!("Cloud OCR: {} text annotations", blocks.len());
        Ok(blocks)
    }

    fn units(&self) -> CoordinateUnits {
        CoordinateUnits::Pixel
    }

    fn name(&self) -> &'static str {
        "cloud"
    }
}

/// Map an annotate response into raw text blocks.
///
/// Annotations without a usable bounding polygon keep `None` bounds; the
/// normalizer substitutes its default region for those.
fn parse_response(response: AnnotateResponse) -> Vec<RawTextBlock> {
    let Some(first) = response.responses.into_iter().next() else {
        return vec![];
    };

    first
        .text_annotations
        .into_iter()
        .map(|annotation| {
            let bounds = annotation.bounding_poly.and_then(vertices_to_bounds);
            RawTextBlock {
                text: annotation.description,
                bounding_box: bounds,
                frame: None,
                confidence: annotation.score,
            }
        })
        .collect()
}

/// Opposite corners of the polygon (vertex 0 and vertex 2) become the box
fn vertices_to_bounds(poly: BoundingPoly) -> Option<RawBounds> {
    let first = poly.vertices.first()?;
    let third = poly.vertices.get(2)?;

    Some(RawBounds {
        x: Some(first.x),
        y: Some(first.y),
        width: Some(third.x - first.x),
        height: Some(third.y - first.y),
        ..Default::default()
    })
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotationRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotationRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: String,
    #[serde(rename = "maxResults")]
    max_results: u32,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotationResponse>,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotationResponse {
    #[serde(default, rename = "textAnnotations")]
    text_annotations: Vec<TextAnnotation>,
}

#[derive(Debug, Default, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default, rename = "boundingPoly")]
    bounding_poly: Option<BoundingPoly>,
    #[serde(default)]
    score: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct BoundingPoly {
    #[serde(default)]
    vertices: Vec<Vertex>,
}

#[derive(Debug, Default, Deserialize)]
struct Vertex {
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
}
