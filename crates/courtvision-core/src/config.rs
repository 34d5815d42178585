//! Tunable parameters for shot detection and stats aggregation.

use serde::{Deserialize, Serialize};

/// Configuration for the shot event detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotConfig {
    /// Rolling-mean window (frames) applied to the ball center-y series.
    ///
    /// The mean is centered, so a symmetric direction reversal is reported on
    /// its exact frame.
    pub smoothing_window: usize,
    /// Minimum vertical displacement (pixels) the smoothed trajectory must
    /// cover on each side of a candidate reversal.
    pub min_displacement_px: f64,
    /// Half-width (frames) of the window used to measure that displacement.
    pub confirm_window: usize,
    /// Candidates closer together than this many frames merge into one,
    /// keeping the earlier frame. 20 frames is roughly 0.8 s at 24 fps.
    pub min_gap_frames: usize,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 5,
            min_displacement_px: 10.0,
            confirm_window: 25,
            min_gap_frames: 20,
        }
    }
}

/// Configuration for the stats aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Camera frame rate, used to convert frame intervals to seconds.
    pub fps: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { fps: 24.0 }
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub shot: ShotConfig,
    pub stats: StatsConfig,
}

// ── Tests ────────────────────────────────────────────────────────────────
