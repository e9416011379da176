use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as edges.
///
/// Coordinates are either normalized to `[0, 1]` or in pixels; the tracker
/// only requires that every box in a session uses the same space.
/// A box is valid when `left <= right` and `top <= bottom`. Invalid boxes
/// have zero area and never overlap anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top edge (minimum y)
    pub top: f32,
    /// Left edge (minimum x)
    pub left: f32,
    /// Bottom edge (maximum y)
    pub bottom: f32,
    /// Right edge (maximum x)
    pub right: f32,
}

/// Pixel-space rectangle in TLWH form, as handed to an overlay renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a box from its edges in `(top, left, bottom, right)` order.
    #[inline]
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Create a box from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(y1, x1, y2, x2)
    }

    /// Create a box from TLWH format (top-left x, top-left y, width, height).
    #[inline]
    pub fn from_tlwh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(y, x, y + height, x + width)
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.left, self.top, self.width(), self.height()]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Get the center point of the bounding box as `(x, y)`.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True when every edge is finite and the edges are ordered.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.left <= self.right && self.top <= self.bottom
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.left.is_finite()
            && self.bottom.is_finite()
            && self.right.is_finite()
    }

    /// Get the area of the bounding box. Invalid boxes have area 0.
    #[inline]
    pub fn area(&self) -> f32 {
        if self.is_valid() {
            self.width() * self.height()
        } else {
            0.0
        }
    }

    /// Scale a normalized box to a `width` x `height` frame.
    pub fn scale(&self, width: u32, height: u32) -> PixelRect {
        let (w, h) = (width as f64, height as f64);
        PixelRect {
            x: self.left as f64 * w,
            y: self.top as f64 * h,
            width: self.width() as f64 * w,
            height: self.height() as f64 * h,
        }
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    ///
    /// Always returns a value in `[0, 1]`. Disjoint, inverted, zero-area and
    /// non-finite boxes all yield 0.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        if !self.is_finite() || !other.is_finite() {
            return 0.0;
        }

        let inter_left = self.left.max(other.left);
        let inter_top = self.top.max(other.top);
        let inter_right = self.right.min(other.right);
        let inter_bottom = self.bottom.min(other.bottom);

        if inter_left >= inter_right || inter_top >= inter_bottom {
            return 0.0;
        }

        let inter_area = (inter_right - inter_left) * (inter_bottom - inter_top);
        let self_area = self.width() * self.height();
        let other_area = other.width() * other.height();
        let union_area = self_area + other_area - inter_area;

        if !union_area.is_finite() || union_area <= 0.0 {
            return 0.0;
        }

        let iou = inter_area / union_area;
        if iou.is_finite() { iou.clamp(0.0, 1.0) } else { 0.0 }
    }
}

/// Calculate IoU matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`.
pub fn iou_matrix(boxes_a: &[BoundingBox], boxes_b: &[BoundingBox]) -> Array2<f32> {
    let mut ious = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            ious[[i, j]] = a.iou(b);
        }
    }
    ious
}
