//! Shared builders for synthetic detection streams used across module tests.

use std::collections::BTreeMap;

use crate::detection::{CourtKeypoints, PlayerFrame, PlayerId, COURT_KEYPOINT_COUNT};
use crate::geom::Bbox;

/// Dense ball stream whose box centers follow the given center-y series.
///
/// Boxes are 10×10 px around (500, y).
pub(crate) fn ball_stream_from_ys(ys: &[f64]) -> Vec<Option<Bbox>> {
    ys.iter()
        .map(|&y| Some(Bbox::new(495.0, y - 5.0, 505.0, y + 5.0)))
        .collect()
}

/// A plausible 14-point pixel keypoint set spanning a 500×600 px court
/// region with its top-left corner at (400, 150).
pub(crate) fn pixel_keypoints() -> CourtKeypoints {
    let (x0, y0, w, h) = (400.0, 150.0, 500.0, 600.0);
    let pts = vec![
        [x0, y0],
        [x0 + w, y0],
        [x0, y0 + h],
        [x0 + w, y0 + h],
        [x0 + 0.12 * w, y0],
        [x0 + 0.12 * w, y0 + h],
        [x0 + 0.88 * w, y0],
        [x0 + 0.88 * w, y0 + h],
        [x0 + 0.12 * w, y0 + 0.23 * h],
        [x0 + 0.88 * w, y0 + 0.23 * h],
        [x0 + 0.12 * w, y0 + 0.77 * h],
        [x0 + 0.88 * w, y0 + 0.77 * h],
        [x0 + 0.5 * w, y0 + 0.23 * h],
        [x0 + 0.5 * w, y0 + 0.77 * h],
    ];
    debug_assert_eq!(pts.len(), COURT_KEYPOINT_COUNT);
    CourtKeypoints::new(pts).expect("14 points")
}

/// Player frame with the given id → box entries.
pub(crate) fn player_frame(entries: &[(PlayerId, Bbox)]) -> PlayerFrame {
    entries.iter().copied().collect()
}

/// Mini-court position map for two players.
pub(crate) fn positions(entries: &[(PlayerId, [f64; 2])]) -> BTreeMap<PlayerId, [f64; 2]> {
    entries.iter().copied().collect()
}
