//! Error type for the analysis pipeline.
//!
//! Per-frame detection gaps are not errors (they are recovered by
//! interpolation and forward-fill); these variants cover structural failures
//! and lookups that signal an upstream selection bug.

use crate::detection::PlayerId;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The reference frame had fewer player detections than required.
    InsufficientPlayers { needed: usize, got: usize },
    /// The whole video produced no ball detection, but stats were requested.
    NoBallDetections,
    /// A stats/projection lookup referenced a player absent at that frame.
    MissingPlayer { id: PlayerId, frame: usize },
    /// A stats lookup referenced a frame with no ball position.
    MissingBall { frame: usize },
    /// The court keypoint set does not have the expected number of points.
    KeypointCount { expected: usize, got: usize },
    /// The court keypoints span a zero-width or zero-height pixel region.
    DegenerateKeypoints,
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientPlayers { needed, got } => {
                write!(f, "too few players in reference frame: need {}, got {}", needed, got)
            }
            Self::NoBallDetections => write!(f, "no ball detections in the whole video"),
            Self::MissingPlayer { id, frame } => {
                write!(f, "missing player {} at frame {}", id, frame)
            }
            Self::MissingBall { frame } => write!(f, "missing ball position at frame {}", frame),
            Self::KeypointCount { expected, got } => {
                write!(f, "bad court keypoint count: expected {}, got {}", expected, got)
            }
            Self::DegenerateKeypoints => {
                write!(f, "court keypoints span a degenerate pixel region")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}
