use thiserror::Error;

/// Errors raised when building a tracker from an invalid configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error("max_missed must be at least 1, got {0}")]
    InvalidMaxMissed(u32),
    #[error("min_score must be a finite value in [0, 1], got {0}")]
    InvalidMinScore(f32),
    #[error("iou_threshold must be a finite value in [0, 1], got {0}")]
    InvalidIouThreshold(f32),
}

