//! Builder for creating Detection objects from various input formats.

use crate::tracker::{BoundingBox, ClassId, Detection};

/// Builder for creating `Detection` objects from various input formats.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    bbox: BoundingBox,
    score: f32,
    class_id: ClassId,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box by its edges (top, left, bottom, right), the layout
    /// of SSD-style detector outputs.
    pub fn edges(mut self, top: f32, left: f32, bottom: f32, right: f32) -> Self {
        self.bbox = BoundingBox::new(top, left, bottom, right);
        self
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = BoundingBox::from_tlbr(x1, y1, x2, y2);
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.bbox = BoundingBox::from_tlwh(cx - w / 2.0, cy - h / 2.0, w, h);
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.bbox = BoundingBox::from_tlwh(x, y, w, h);
        self
    }

    /// Set the confidence score.
    pub fn score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    pub fn class(mut self, class_id: impl Into<ClassId>) -> Self {
        self.class_id = class_id.into();
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Detection {
        Detection {
            score: self.score,
            class_id: self.class_id,
            bbox: self.bbox,
        }
    }
}
