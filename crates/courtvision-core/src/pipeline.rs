//! Top-level analysis orchestrator: interpolate → filter → project → shots →
//! stats.
//!
//! Each stage consumes the complete output of the previous one; the pipeline
//! is a single-pass batch transformation over fully decoded detection
//! streams. Per-frame gaps are recovered by interpolation and forward-fill;
//! structural failures (bad keypoints, fewer than two players) propagate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::detection::{BallFrame, CourtKeypoints, PlayerFrame, PlayerId};
use crate::error::AnalysisError;
use crate::interpolate::interpolate_ball_stream;
use crate::minicourt::MiniCourt;
use crate::players::{filter_player_stream, select_players};
use crate::shots::detect_shot_frames;
use crate::stats::{aggregate, fill_frame_table, StatsRecord};

/// Complete analysis output, ready for an external renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAnalysis {
    /// The two selected player ids, ascending.
    pub player_ids: [PlayerId; 2],
    /// Frames at which a shot was inferred, strictly increasing.
    pub shot_frames: Vec<usize>,
    /// Dense per-frame stats table, one record per input frame.
    pub stats: Vec<StatsRecord>,
    /// Mini-court player positions per frame (foot points).
    pub player_positions: Vec<BTreeMap<PlayerId, [f64; 2]>>,
    /// Mini-court ball positions per frame (box centers), `None` before the
    /// first detection.
    pub ball_positions: Vec<Option<[f64; 2]>>,
    /// The court model used for projection, for overlay rendering.
    pub mini_court: MiniCourt,
}

/// Run the full analysis over raw detection streams.
///
/// `players_raw` and `ball_raw` must cover the same frame range. A video
/// with no ball detections at all still produces a result (players are
/// filtered and projected) with empty shot and stats output.
pub fn analyze(
    players_raw: &[PlayerFrame],
    ball_raw: &[BallFrame],
    keypoints: &CourtKeypoints,
    cfg: &AnalysisConfig,
) -> Result<MatchAnalysis, AnalysisError> {
    let n_frames = players_raw.len().max(ball_raw.len());
    tracing::info!("analyzing {} frames", n_frames);

    let ball = interpolate_ball_stream(ball_raw);

    let reference = players_raw.first().cloned().unwrap_or_default();
    let player_ids = select_players(keypoints, &reference)?;
    let players = filter_player_stream(players_raw, player_ids);

    let mini_court = MiniCourt::new(keypoints)?;
    let (player_positions, ball_positions) = mini_court.convert_streams(&players, &ball);

    let shot_frames = detect_shot_frames(&ball, &cfg.shot);
    tracing::info!("detected {} shot events", shot_frames.len());

    let stats = if ball.iter().any(Option::is_some) {
        let records = aggregate(
            &shot_frames,
            &player_positions,
            &ball_positions,
            &mini_court,
            player_ids,
            &cfg.stats,
        )?;
        fill_frame_table(&records, player_ids, n_frames)
    } else {
        tracing::warn!("no ball detections in the whole video; stats table is all zeros");
        fill_frame_table(&[], player_ids, n_frames)
    };

    Ok(MatchAnalysis {
        player_ids,
        shot_frames,
        stats,
        player_positions,
        ball_positions,
        mini_court,
    })
}

// ── Tests ────────────────────────────────────────────────────────────────
