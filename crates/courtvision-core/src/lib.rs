//! courtvision-core — batch analytics for tennis match footage.
//!
//! Consumes per-frame detection streams produced by external detector
//! collaborators (players, ball, court keypoints) and turns them into match
//! analytics. The pipeline stages are:
//!
//! 1. **Interpolate** – fill ball detection gaps by linear interpolation.
//! 2. **Players** – select the two on-court players from arbitrary person
//!    detections, then filter every frame to those ids.
//! 3. **Mini-court** – project pixel detections into a canonical top-down
//!    court with real-world proportions, calibrated once per video from the
//!    14 court keypoints.
//! 4. **Shots** – infer impact frames from vertical direction reversals of
//!    the smoothed ball trajectory.
//! 5. **Stats** – fold shot intervals into ball-speed, shooter and opponent
//!    movement stats, forward-filled into a dense per-frame table.
//!
//! # Public API
//! [`analyze`] runs the whole pipeline; the stage functions and
//! [`MiniCourt`] are exposed for callers that need individual pieces.

pub mod config;
pub mod detection;
pub mod error;
pub mod geom;
pub mod interpolate;
pub mod minicourt;
pub mod pipeline;
pub mod players;
pub mod shots;
pub mod stats;

#[cfg(test)]
mod test_utils;

pub use config::{AnalysisConfig, ShotConfig, StatsConfig};
pub use detection::{BallFrame, CourtKeypoints, PlayerFrame, PlayerId, COURT_KEYPOINT_COUNT};
pub use error::AnalysisError;
pub use geom::Bbox;
pub use interpolate::interpolate_ball_stream;
pub use minicourt::{meters_to_pixel_distance, pixel_distance_to_meters, MiniCourt};
pub use pipeline::{analyze, MatchAnalysis};
pub use players::{filter_player_stream, select_players};
pub use shots::detect_shot_frames;
pub use stats::{aggregate, fill_frame_table, PlayerIntervalStats, StatsRecord};
