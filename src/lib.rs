//! Greedy IoU-only multi-object tracking for video analytics pipelines.
//!
//! Feed one frame's detections at a time into [`SortTracker::update`]; each
//! detection comes back annotated with a stable track id, and
//! [`SortTracker::average_score`] summarizes tracking quality.
//!
//! ```
//! use sortlite_rs::{BoundingBox, Detection, SortTracker, TrackerConfig};
//!
//! let mut tracker = SortTracker::new(TrackerConfig::default()).unwrap();
//! let face = Detection::from_box(BoundingBox::new(0.1, 0.1, 0.3, 0.3), 0.9);
//!
//! let first = tracker.update(vec![face.clone()]);
//! let second = tracker.update(vec![face]);
//! assert_eq!(first[0].track_id, second[0].track_id);
//! ```

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::TrackerError;
pub use integration::{
    DetectionBuilder, DetectionSource, FrameOutput, IntoDetections, TrackerPipeline,
};
pub use tracker::{
    BoundingBox, ClassId, Detection, FrameStats, SortTracker, Track, TrackState,
    TrackedDetection, TrackerConfig, iou,
};
