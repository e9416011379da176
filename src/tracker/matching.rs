//! Detection-to-track assignment.

use ndarray::Array2;

/// One committed detection-to-track pairing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Row index into the IoU matrix (detection)
    pub detection: usize,
    /// Column index into the IoU matrix (track)
    pub track: usize,
    pub iou: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// Committed pairs, ordered by detection index
    pub matches: Vec<Match>,
    pub unmatched_tracks: Vec<usize>,
    /// Eligible detections left without a track. Ineligible rows are never listed.
    pub unmatched_detections: Vec<usize>,
}

/// Assignment rule used by the tracker's matching phase.
///
/// `ious` has one row per detection and one column per track, columns in
/// ascending track id order. Rows with `eligible[row] == false` must be left
/// out of the result entirely. The tracker only applies `matches`; it drops
/// pairs that break these rules and works out the unmatched sets itself.
pub trait Matcher {
    fn assign(&self, ious: &Array2<f32>, eligible: &[bool], iou_threshold: f32)
    -> AssignmentResult;
}

/// First-come greedy matcher.
///
/// Detections are visited in row order and each takes the free track with
/// the highest IoU at or above the threshold. A candidate must beat the
/// current best strictly, so the lowest column (lowest track id) wins ties.
/// Zero overlap never matches, even with a zero threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatcher;

impl Matcher for GreedyMatcher {
    fn assign(
        &self,
        ious: &Array2<f32>,
        eligible: &[bool],
        iou_threshold: f32,
    ) -> AssignmentResult {
        let (num_dets, num_tracks) = ious.dim();
        debug_assert_eq!(eligible.len(), num_dets);

        let mut track_taken = vec![false; num_tracks];
        let mut matches = Vec::new();
        let mut unmatched_detections = Vec::new();

        for (det, _) in eligible.iter().enumerate().filter(|(_, ok)| **ok) {
            let mut best: Option<usize> = None;
            let mut best_iou = 0.0f32;

            for track in (0..num_tracks).filter(|&t| !track_taken[t]) {
                let iou = ious[[det, track]];
                if iou >= iou_threshold && iou > best_iou {
                    best_iou = iou;
                    best = Some(track);
                }
            }

            match best {
                Some(track) => {
                    track_taken[track] = true;
                    matches.push(Match {
                        detection: det,
                        track,
                        iou: best_iou,
                    });
                }
                None => unmatched_detections.push(det),
            }
        }

        let unmatched_tracks = track_taken
            .iter()
            .enumerate()
            .filter_map(|(i, &taken)| if taken { None } else { Some(i) })
            .collect();

        AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        }
    }
}
