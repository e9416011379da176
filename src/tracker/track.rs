//! Single object track.

use std::time::{Duration, Instant};

use crate::tracker::rect::BoundingBox;
use crate::tracker::track_state::TrackState;

/// Single object track.
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique track identifier, never reused within a tracker
    pub id: u64,
    /// Box of the last matched detection
    pub bbox: BoundingBox,
    /// Number of frames the track has been observed
    pub age: u32,
    /// Consecutive frames without a matching detection
    pub missed: u32,
    /// Running mean of match IoU over the `age - 1` matched frames
    pub sort_score: f32,
    pub created_at: Instant,
}

impl Track {
    /// Start a new track from an unmatched detection box.
    pub fn new(id: u64, bbox: BoundingBox, created_at: Instant) -> Self {
        Self {
            id,
            bbox,
            age: 1,
            missed: 0,
            sort_score: 0.0,
            created_at,
        }
    }

    /// Apply a matched detection box observed with overlap `iou`.
    pub fn update(&mut self, bbox: BoundingBox, iou: f32) {
        self.bbox = bbox;
        self.age += 1;
        self.missed = 0;
        let matches = (self.age - 1) as f32;
        self.sort_score = (self.sort_score * (matches - 1.0) + iou) / matches;
    }

    /// Record a frame without a match. Returns the new miss count.
    pub fn mark_missed(&mut self) -> u32 {
        self.missed += 1;
        self.missed
    }

    /// Time elapsed between creation and `now` (zero if `now` precedes creation).
    pub fn active_time(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    pub fn state(&self) -> TrackState {
        if self.missed > 0 {
            TrackState::Lost
        } else if self.age == 1 {
            TrackState::New
        } else {
            TrackState::Tracked
        }
    }
}
