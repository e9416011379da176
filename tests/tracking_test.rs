use std::collections::HashSet;
use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use sortlite_rs::{BoundingBox, Detection, SortTracker, TrackState, TrackerConfig};

fn det(top: f32, left: f32, bottom: f32, right: f32, score: f32) -> Detection {
    Detection::from_box(BoundingBox::new(top, left, bottom, right), score)
}

fn tracker(max_missed: u32, min_score: f32, iou_threshold: f32) -> SortTracker {
    SortTracker::with_params(max_missed, min_score, iou_threshold).unwrap()
}

#[test]
fn test_example_scenario() {
    let mut tracker = tracker(5, 0.2, 0.3);
    let start = Instant::now();
    let frame = |n: u64| start + Duration::from_millis(66 * n);

    // Frame 1: one detection starts track 1
    let out = tracker.update_at(vec![det(0.0, 0.0, 10.0, 10.0, 0.9)], frame(1));
    assert_eq!(out.len(), 1);
    assert!(out[0].is_new);
    assert_eq!(out[0].track_id, 1);
    assert_eq!(out[0].age, 1);

    // Frame 2: same box continues it
    let out = tracker.update_at(vec![det(0.0, 0.0, 10.0, 10.0, 0.9)], frame(2));
    assert_eq!(out.len(), 1);
    assert!(!out[0].is_new);
    assert_eq!(out[0].track_id, 1);
    assert_eq!(out[0].age, 2);
    assert_relative_eq!(out[0].match_iou, 1.0);
    assert_relative_eq!(out[0].sort_score, 1.0);
    assert_relative_eq!(tracker.average_score(), 1.0);

    // Frames 3-7: missed 1..=5, track survives
    for (missed, n) in (1..=5).zip(3..=7) {
        let out = tracker.update_at(vec![], frame(n));
        assert!(out.is_empty());
        let track = tracker.track(1).expect("track 1 should still be live");
        assert_eq!(track.missed, missed);
        assert_eq!(track.state(), TrackState::Lost);
    }

    // Frame 8: missed would be 6 > 5
    tracker.update_at(vec![], frame(8));
    assert!(tracker.track(1).is_none());
    assert!(tracker.is_empty());
    assert_eq!(tracker.average_score(), 0.0);
    assert_eq!(tracker.last_frame_stats().pruned, 1);
}

#[test]
fn test_track_continuity() {
    let mut tracker = tracker(5, 0.2, 0.3);
    let n = 12;

    for frame in 1..=n {
        let out = tracker.update(vec![det(5.0, 5.0, 25.0, 25.0, 0.8)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].track_id, 1);
        assert_eq!(out[0].is_new, frame == 1);
        assert_eq!(out[0].age, frame);
    }

    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.track(1).map(|t| t.age), Some(n));
}

#[test]
fn test_new_tracks_get_fresh_ids() {
    let mut tracker = tracker(1, 0.2, 0.3);
    let mut seen = HashSet::new();

    // Each frame brings a box far from every previous one.
    for i in 0..20 {
        let offset = i as f32 * 100.0;
        let out = tracker.update(vec![det(offset, offset, offset + 10.0, offset + 10.0, 0.9)]);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_new);
        assert!(seen.insert(out[0].track_id), "track id reused");
    }

    // Old tracks were pruned along the way; ids still never repeat.
    assert!(tracker.len() <= 2);
}

#[test]
fn test_pruning_boundary() {
    let max_missed = 3;
    let mut tracker = tracker(max_missed, 0.2, 0.3);
    tracker.update(vec![det(0.0, 0.0, 10.0, 10.0, 0.9)]);

    for _ in 0..max_missed {
        tracker.update(vec![]);
    }
    assert_eq!(tracker.track(1).map(|t| t.missed), Some(max_missed));

    tracker.update(vec![]);
    assert!(tracker.track(1).is_none());
}

#[test]
fn test_match_resets_missed() {
    let mut tracker = tracker(2, 0.2, 0.3);
    tracker.update(vec![det(0.0, 0.0, 10.0, 10.0, 0.9)]);
    tracker.update(vec![]);
    tracker.update(vec![]);

    let out = tracker.update(vec![det(1.0, 1.0, 11.0, 11.0, 0.9)]);
    assert_eq!(out[0].track_id, 1);
    assert_eq!(tracker.track(1).map(|t| t.missed), Some(0));

    tracker.update(vec![]);
    tracker.update(vec![]);
    assert!(tracker.track(1).is_some());
}

#[test]
fn test_score_filtering() {
    let mut tracker = tracker(5, 0.5, 0.3);

    let out = tracker.update(vec![
        det(0.0, 0.0, 10.0, 10.0, 0.49),
        det(20.0, 20.0, 30.0, 30.0, 0.5),
    ]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].detection.score, 0.5);
    assert_eq!(tracker.len(), 1);

    // A low-score detection over a live track neither matches nor creates.
    let out = tracker.update(vec![det(20.0, 20.0, 30.0, 30.0, 0.1)]);
    assert!(out.is_empty());
    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.track(1).map(|t| (t.age, t.missed)), Some((1, 1)));
}

#[test]
fn test_all_below_min_score_only_prunes() {
    let mut tracker = tracker(1, 0.5, 0.3);
    tracker.update(vec![det(0.0, 0.0, 10.0, 10.0, 0.9)]);

    let low = || vec![det(0.0, 0.0, 10.0, 10.0, 0.1), det(50.0, 50.0, 60.0, 60.0, 0.2)];
    assert!(tracker.update(low()).is_empty());
    assert_eq!(tracker.len(), 1);
    assert!(tracker.update(low()).is_empty());
    assert!(tracker.is_empty());
}

#[test]
fn test_running_mean_of_match_ious() {
    let mut tracker = tracker(5, 0.2, 0.1);
    tracker.update(vec![det(0.0, 0.0, 10.0, 10.0, 0.9)]);

    // Shift right by 0, 2, 5 units against the previous box each frame.
    let frames = [
        det(0.0, 0.0, 10.0, 10.0, 0.9),
        det(0.0, 2.0, 10.0, 12.0, 0.9),
        det(0.0, 7.0, 10.0, 17.0, 0.9),
    ];
    let mut ious = Vec::new();
    for d in frames {
        let out = tracker.update(vec![d]);
        assert_eq!(out[0].track_id, 1);
        ious.push(out[0].match_iou);
    }

    assert_relative_eq!(ious[0], 1.0);
    assert_relative_eq!(ious[1], 80.0 / 120.0, epsilon = 1e-6);
    assert_relative_eq!(ious[2], 50.0 / 150.0, epsilon = 1e-6);

    let mean = ious.iter().sum::<f32>() / ious.len() as f32;
    let track = tracker.track(1).unwrap();
    assert_eq!(track.age, 4);
    assert_relative_eq!(track.sort_score, mean, epsilon = 1e-6);
}

#[test]
fn test_average_score_ignores_single_frame_tracks() {
    let mut tracker = tracker(5, 0.2, 0.3);
    tracker.update(vec![det(0.0, 0.0, 10.0, 10.0, 0.9)]);
    tracker.update(vec![
        det(0.0, 0.0, 10.0, 10.0, 0.9),
        det(100.0, 100.0, 110.0, 110.0, 0.9),
    ]);

    assert_eq!(tracker.len(), 2);
    assert_relative_eq!(tracker.average_score(), 1.0);
}

#[test]
fn test_config_defaults_match_face_tracking() {
    let config = TrackerConfig::default();
    assert_eq!(config.max_missed, 5);
    assert_relative_eq!(config.min_score, 0.2);
    assert_relative_eq!(config.iou_threshold, 0.3);
}
