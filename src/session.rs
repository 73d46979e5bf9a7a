//! Capture session state
//!
//! One capture at a time: the current photo, its detection boxes and the
//! selected box id. Writes are serialized by the single control flow, so
//! there is no locking; a capture-generation token keeps a detection pass
//! that outlived a retake from overwriting the newer capture's state.

use tracing::debug;

use crate::capture::CapturedImage;
use crate::crop::CroppedImage;
use crate::detect::{largest_box, DetectionBox};

/// The payload handed to the downstream subject-tagging consumer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    /// The cropped region image
    pub cropped: CroppedImage,
    /// Subject tag chosen by the user
    pub subject: String,
}

/// State for the capture -> detect -> select -> crop flow
#[derive(Debug, Default)]
pub struct CaptureSession {
    generation: u64,
    capture: Option<CapturedImage>,
    boxes: Vec<DetectionBox>,
    selected: Option<u32>,
}

impl CaptureSession {
    /// Create an idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current capture generation token
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current capture, if any
    pub fn capture(&self) -> Option<&CapturedImage> {
        self.capture.as_ref()
    }

    /// Detection boxes for the current capture
    pub fn boxes(&self) -> &[DetectionBox] {
        &self.boxes
    }

    /// Start a new capture. Replaces any previous capture, clears boxes
    /// and selection, and returns the generation token the detection pass
    /// must present when its results arrive.
    pub fn begin_capture(&mut self, image: CapturedImage) -> u64 {
        self.generation += 1;
        self.capture = Some(image);
        self.boxes.clear();
        self.selected = None;
        self.generation
    }

    /// Store a detection pass's boxes and auto-select the largest one.
    ///
    /// Returns false and changes nothing when `generation` is stale, so a
    /// superseded pass arriving late cannot clobber a newer capture.
    pub fn apply_detection(&mut self, generation: u64, boxes: Vec<DetectionBox>) -> bool {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "discarding detection results from a superseded capture"
            );
            return false;
        }

        self.selected = largest_box(&boxes).map(|b| b.id);
        self.boxes = boxes;
        true
    }

    /// Select a box by id, replacing the prior selection.
    /// Returns false when no box with that id exists.
    pub fn select(&mut self, id: u32) -> bool {
        if self.boxes.iter().any(|b| b.id == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// The currently selected box, if any
    pub fn selected_box(&self) -> Option<&DetectionBox> {
        let id = self.selected?;
        self.boxes.iter().find(|b| b.id == id)
    }

    /// Discard everything back to the idle state. The generation bump
    /// invalidates any in-flight detection pass.
    pub fn retake(&mut self) {
        self.generation += 1;
        self.capture = None;
        self.boxes.clear();
        self.selected = None;
    }

    /// Complete the flow: hand the crop and subject tag downstream and
    /// reset the session.
    pub fn handoff(&mut self, cropped: CroppedImage, subject: impl Into<String>) -> Handoff {
        let handoff = Handoff {
            cropped,
            subject: subject.into(),
        };
        self.retake();
        handoff
    }
}
