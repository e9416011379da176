//! Detection types consumed and produced by the tracker.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tracker::rect::BoundingBox;

/// Class of a detected object: a model class index or a text label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassId {
    Index(u32),
    Label(String),
}

impl Default for ClassId {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl From<u32> for ClassId {
    fn from(index: u32) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for ClassId {
    fn from(label: &str) -> Self {
        Self::Label(label.to_owned())
    }
}

impl From<String> for ClassId {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Detection input for the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Detection confidence score
    pub score: f32,
    /// Detected object class
    pub class_id: ClassId,
    /// Bounding box of the detection
    pub bbox: BoundingBox,
}

impl Detection {
    /// Create a detection from a TLBR box (x1, y1, x2, y2) with the default class.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Self {
        Self::from_box(BoundingBox::from_tlbr(x1, y1, x2, y2), score)
    }

    pub fn from_box(bbox: BoundingBox, score: f32) -> Self {
        Self {
            score,
            class_id: ClassId::default(),
            bbox,
        }
    }

    pub fn with_class(mut self, class_id: impl Into<ClassId>) -> Self {
        self.class_id = class_id.into();
        self
    }
}

/// A detection annotated with the identity of the track it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedDetection {
    /// The original detection
    pub detection: Detection,
    /// Id of the matched or newly created track
    pub track_id: u64,
    /// True when this detection created its track in this frame
    pub is_new: bool,
    /// Frames the track has been observed, including this one
    pub age: u32,
    /// Time elapsed since the track was created
    pub tracking_since: Duration,
    /// IoU between the detection and the track's previous box (0 for new tracks)
    pub match_iou: f32,
    /// Running mean of the track's match IoU after this frame
    pub sort_score: f32,
}

impl TrackedDetection {
    pub fn bbox(&self) -> &BoundingBox {
        &self.detection.bbox
    }

    pub fn score(&self) -> f32 {
        self.detection.score
    }

    /// Overlay caption, e.g. `ID-3 87%, 12 sec`.
    pub fn label(&self) -> String {
        format!(
            "ID-{} {}%, {} sec",
            self.track_id,
            percent(self.detection.score),
            self.tracking_since.as_secs()
        )
    }
}

/// Overlay caption for the tracker's aggregate score, e.g. `Tracking score: 93%`.
pub fn format_tracking_score(score: f32) -> String {
    format!("Tracking score: {}%", percent(score))
}

fn percent(value: f32) -> i32 {
    (value * 100.0) as i32
}
