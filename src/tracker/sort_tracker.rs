//! Main SORT-lite tracking loop.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::tracker::detection::{Detection, TrackedDetection};
use crate::tracker::matching::{AssignmentResult, GreedyMatcher, Match, Matcher};
use crate::tracker::rect::{BoundingBox, iou_matrix};
use crate::tracker::track::Track;

/// Configuration for the [`SortTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Consecutive unmatched frames a track survives before it is dropped
    pub max_missed: u32,
    /// Detections scoring below this are ignored
    pub min_score: f32,
    /// Minimum IoU for a detection to continue a track
    pub iou_threshold: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_missed: 5,
            min_score: 0.2,
            iou_threshold: 0.3,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.max_missed == 0 {
            return Err(TrackerError::InvalidMaxMissed(self.max_missed));
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(TrackerError::InvalidMinScore(self.min_score));
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(TrackerError::InvalidIouThreshold(self.iou_threshold));
        }
        Ok(())
    }
}

/// Counters describing the most recent update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    /// 1-based index of the update call
    pub frame: u64,
    pub matched: usize,
    pub created: usize,
    /// Detections discarded for scoring below `min_score`
    pub dropped: usize,
    pub pruned: usize,
    pub live_tracks: usize,
}

/// Greedy IoU tracker.
///
/// Tracks are kept ordered by id, so the matcher sees them in ascending id
/// order on every frame. Not synchronized; share it behind a `Mutex` if
/// more than one thread needs access.
#[derive(Debug)]
pub struct SortTracker<M = GreedyMatcher> {
    tracks: BTreeMap<u64, Track>,
    next_id: u64,
    frame_count: u64,
    last_stats: FrameStats,
    config: TrackerConfig,
    matcher: M,
}

impl SortTracker<GreedyMatcher> {
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        Self::with_matcher(config, GreedyMatcher)
    }

    /// Build a tracker from the three raw parameters.
    pub fn with_params(
        max_missed: u32,
        min_score: f32,
        iou_threshold: f32,
    ) -> Result<Self, TrackerError> {
        Self::new(TrackerConfig {
            max_missed,
            min_score,
            iou_threshold,
        })
    }
}

impl Default for SortTracker<GreedyMatcher> {
    fn default() -> Self {
        Self::from_valid(TrackerConfig::default(), GreedyMatcher)
    }
}

impl<M: Matcher> SortTracker<M> {
    /// Build a tracker that assigns detections with a custom matcher.
    pub fn with_matcher(config: TrackerConfig, matcher: M) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self::from_valid(config, matcher))
    }

    fn from_valid(config: TrackerConfig, matcher: M) -> Self {
        info!(
            "sort tracker created: max_missed={} min_score={} iou_threshold={}",
            config.max_missed, config.min_score, config.iou_threshold
        );
        Self {
            tracks: BTreeMap::new(),
            next_id: 1,
            frame_count: 0,
            last_stats: FrameStats::default(),
            config,
            matcher,
        }
    }

    /// Process one frame's detections, stamped with the current time.
    pub fn update(&mut self, detections: Vec<Detection>) -> Vec<TrackedDetection> {
        self.update_at(detections, Instant::now())
    }

    /// Process one frame's detections observed at `now`.
    ///
    /// Returns matched detections in input order followed by detections that
    /// started new tracks, also in input order. Detections below
    /// `min_score` (or with a NaN score) are dropped from the output.
    pub fn update_at(
        &mut self,
        detections: Vec<Detection>,
        now: Instant,
    ) -> Vec<TrackedDetection> {
        self.frame_count += 1;

        // Step 1: Greedy association against the live tracks
        let track_ids: Vec<u64> = self.tracks.keys().copied().collect();
        let track_boxes: Vec<BoundingBox> = self.tracks.values().map(|t| t.bbox).collect();
        let det_boxes: Vec<BoundingBox> = detections.iter().map(|d| d.bbox).collect();
        let eligible: Vec<bool> = detections
            .iter()
            .map(|d| d.score >= self.config.min_score)
            .collect();
        let dropped = eligible.iter().filter(|ok| !**ok).count();

        let ious = iou_matrix(&det_boxes, &track_boxes);
        let AssignmentResult { mut matches, .. } =
            self.matcher.assign(&ious, &eligible, self.config.iou_threshold);
        // Pairs on ineligible rows, out-of-range indices or already claimed
        // tracks are ignored below. Leftover rows and columns are derived
        // here rather than taken from the matcher.
        matches.sort_by_key(|m| m.detection);

        let mut slots: Vec<Option<Detection>> = detections.into_iter().map(Some).collect();
        let mut assigned = vec![false; track_ids.len()];
        let mut output = Vec::with_capacity(slots.len());
        let mut matched = 0;

        for Match {
            detection,
            track,
            iou,
        } in matches
        {
            if !eligible.get(detection).copied().unwrap_or(false)
                || assigned.get(track).copied().unwrap_or(true)
            {
                continue;
            }
            let Some(&track_id) = track_ids.get(track) else {
                continue;
            };
            let (Some(entry), Some(det)) = (
                self.tracks.get_mut(&track_id),
                slots.get_mut(detection).and_then(Option::take),
            ) else {
                continue;
            };
            assigned[track] = true;
            entry.update(det.bbox, iou);
            trace!(
                "track {} matched detection {} with iou {:.3}",
                track_id, detection, iou
            );
            output.push(TrackedDetection {
                detection: det,
                track_id,
                is_new: false,
                age: entry.age,
                tracking_since: entry.active_time(now),
                match_iou: iou,
                sort_score: entry.sort_score,
            });
            matched += 1;
        }

        // Step 2: Init new tracks from qualified detections left over
        let mut created = 0;
        for (idx, slot) in slots.iter_mut().enumerate() {
            if !eligible[idx] {
                continue;
            }
            let Some(det) = slot.take() else {
                continue;
            };
            let track_id = self.next_id;
            self.next_id += 1;
            self.tracks.insert(track_id, Track::new(track_id, det.bbox, now));
            trace!("track {} created from detection {}", track_id, idx);
            output.push(TrackedDetection {
                detection: det,
                track_id,
                is_new: true,
                age: 1,
                tracking_since: Duration::ZERO,
                match_iou: 0.0,
                sort_score: 0.0,
            });
            created += 1;
        }

        // Step 3: Age out tracks that found no detection
        let max_missed = self.config.max_missed;
        let mut pruned = 0;
        for (&track_id, _) in track_ids.iter().zip(&assigned).filter(|(_, a)| !**a) {
            let Some(track) = self.tracks.get_mut(&track_id) else {
                continue;
            };
            if track.mark_missed() > max_missed {
                self.tracks.remove(&track_id);
                debug!("track {} removed after {} missed frames", track_id, max_missed + 1);
                pruned += 1;
            }
        }

        self.last_stats = FrameStats {
            frame: self.frame_count,
            matched,
            created,
            dropped,
            pruned,
            live_tracks: self.tracks.len(),
        };
        debug!(
            "frame {}: matched={} created={} dropped={} pruned={} live={}",
            self.last_stats.frame,
            self.last_stats.matched,
            self.last_stats.created,
            self.last_stats.dropped,
            self.last_stats.pruned,
            self.last_stats.live_tracks
        );

        output
    }

    /// Mean `sort_score` of tracks matched at least once; 0 when there are none.
    pub fn average_score(&self) -> f32 {
        let (total, count) = self
            .tracks
            .values()
            .filter(|t| t.age > 1)
            .fold((0.0f32, 0usize), |(total, count), t| {
                (total + t.sort_score, count + 1)
            });
        if count == 0 {
            0.0
        } else {
            total / count as f32
        }
    }

    /// Live tracks in ascending id order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn track(&self, id: u64) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn last_frame_stats(&self) -> &FrameStats {
        &self.last_stats
    }

    /// Drop every track and restart frame counting. Ids keep increasing.
    pub fn reset(&mut self) {
        debug!("tracker reset, dropping {} tracks", self.tracks.len());
        self.tracks.clear();
        self.frame_count = 0;
        self.last_stats = FrameStats::default();
    }
}
