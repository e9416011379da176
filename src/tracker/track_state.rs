use serde::{Deserialize, Serialize};

/// Lifecycle view of a live track, derived from its counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackState {
    /// Created from a single detection, not yet matched again
    #[default]
    New,
    /// Matched in the most recent update
    Tracked,
    /// Missed one or more consecutive frames but still retained
    Lost,
}
