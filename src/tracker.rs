mod detection;
mod matching;
mod rect;
mod sort_tracker;
mod track;
mod track_state;

pub use detection::{ClassId, Detection, TrackedDetection, format_tracking_score};
pub use matching::{AssignmentResult, GreedyMatcher, Match, Matcher};
pub use rect::{BoundingBox, PixelRect, iou_matrix};
pub use sort_tracker::{FrameStats, SortTracker, TrackerConfig};
pub use track::Track;
pub use track_state::TrackState;

/// Intersection over Union of two boxes, in `[0, 1]`.
#[inline]
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    a.iou(b)
}
