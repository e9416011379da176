//! Integration module for connecting object detection backends with the tracker.
//!
//! Model execution itself lives outside this crate; a backend only has to
//! implement [`DetectionSource`] to be driven by [`TrackerPipeline`].

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::{FrameOutput, TrackerPipeline};
