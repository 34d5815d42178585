//! Detection stream types produced by external detector collaborators.
//!
//! The detectors themselves (player/ball models, court keypoint regressor)
//! are outside this crate; their per-frame outputs arrive as the types below,
//! usually deserialized from cached stub JSON files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::geom::Bbox;

/// Small integer id assigned to a tracked person by the upstream detector.
///
/// Ids are not guaranteed stable across the whole video; the player filter
/// pins down the two ids it saw in the reference frame and keeps only those.
pub type PlayerId = u32;

/// One frame of player detections: track id → bounding box.
///
/// `BTreeMap` keeps iteration and serialization order deterministic.
pub type PlayerFrame = BTreeMap<PlayerId, Bbox>;

/// Per-frame ball detection: at most one box per frame.
pub type BallFrame = Option<Bbox>;

/// Number of court-line intersection points the keypoint model emits.
pub const COURT_KEYPOINT_COUNT: usize = 14;

/// The 14 court-line intersection points in video-pixel space.
///
/// Detected once from the reference frame and immutable for the whole video
/// (static camera assumption).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct CourtKeypoints {
    points: [[f64; 2]; COURT_KEYPOINT_COUNT],
}

impl CourtKeypoints {
    /// Validate the point count and wrap.
    pub fn new(points: Vec<[f64; 2]>) -> Result<Self, AnalysisError> {
        let got = points.len();
        let points: [[f64; 2]; COURT_KEYPOINT_COUNT] =
            points.try_into().map_err(|_| AnalysisError::KeypointCount {
                expected: COURT_KEYPOINT_COUNT,
                got,
            })?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[[f64; 2]; COURT_KEYPOINT_COUNT] {
        &self.points
    }

    /// Distance from `p` to the nearest keypoint.
    pub fn nearest_distance(&self, p: [f64; 2]) -> f64 {
        self.points
            .iter()
            .map(|&k| crate::geom::point_distance(p, k))
            .fold(f64::INFINITY, f64::min)
    }

    /// Axis-aligned extent of the keypoints: `(min, max)` corners.
    pub fn extent(&self) -> ([f64; 2], [f64; 2]) {
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for p in &self.points {
            for axis in 0..2 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        (min, max)
    }
}

impl TryFrom<Vec<[f64; 2]>> for CourtKeypoints {
    type Error = AnalysisError;

    fn try_from(points: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<CourtKeypoints> for Vec<[f64; 2]> {
    fn from(k: CourtKeypoints) -> Self {
        k.points.to_vec()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
