//! TrackerPipeline for combining detection with tracking.

use log::warn;
use serde::Serialize;

use crate::error::TrackerError;
use crate::tracker::{SortTracker, TrackedDetection, TrackerConfig, format_tracking_score};

use super::{DetectionSource, IntoDetections};

/// Everything the rendering and event layers need for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameOutput {
    pub detections: Vec<TrackedDetection>,
    /// Tracker-wide average match IoU after this frame
    pub average_score: f32,
}

impl FrameOutput {
    /// Overlay caption for `average_score`.
    pub fn score_label(&self) -> String {
        format_tracking_score(self.average_score)
    }
}

/// Bundles any `DetectionSource` with a [`SortTracker`].
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    tracker: SortTracker,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Result<Self, TrackerError> {
        Ok(Self {
            detector,
            tracker: SortTracker::new(config)?,
        })
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self {
            detector,
            tracker: SortTracker::default(),
        }
    }

    /// Run detection on one frame and feed the result to the tracker.
    ///
    /// A detector failure leaves the tracker untouched, so the frame counts
    /// as skipped rather than as a frame without detections.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameOutput, D::Error> {
        let detections = self.detector.detect(input, width, height).inspect_err(|_| {
            warn!(
                "detector failed on {}x{} frame {}, skipping",
                width,
                height,
                self.tracker.frame_count() + 1
            )
        })?;
        Ok(self.process_detections(detections))
    }

    /// Track detections produced outside the pipeline's own detector.
    pub fn process_detections(&mut self, detections: impl IntoDetections) -> FrameOutput {
        let detections = self.tracker.update(detections.into_detections());
        FrameOutput {
            detections,
            average_score: self.tracker.average_score(),
        }
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &SortTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut SortTracker {
        &mut self.tracker
    }
}
