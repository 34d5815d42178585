//! Per-shot-interval match statistics.
//!
//! For every pair of consecutive shot events the aggregator computes the ball
//! speed over the interval, attributes the shot to the player closest to the
//! ball at the interval start, and measures how far the opponent ran. Records
//! accumulate as an explicit fold: each one is built from a clone of the
//! previous record, so counters only ever grow and the output sequence is
//! immutable once produced.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::StatsConfig;
use crate::detection::PlayerId;
use crate::error::AnalysisError;
use crate::geom::point_distance;
use crate::minicourt::MiniCourt;

/// Seconds → hours factor for m/s → km/h.
const MS_TO_KMH: f64 = 3.6;

/// Running counters for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerIntervalStats {
    /// Shots attributed to this player so far.
    pub shot_count: u32,
    pub total_shot_speed_kmh: f64,
    pub last_shot_speed_kmh: f64,
    pub average_shot_speed_kmh: f64,
    /// Movement accumulated while this player was the opponent.
    pub total_move_speed_kmh: f64,
    pub last_move_speed_kmh: f64,
    /// Average movement speed.
    ///
    /// The denominator is the OTHER player's shot count: this player only
    /// accumulates movement in intervals opened by an opponent shot. This
    /// mirrors the historical table semantics; see DESIGN.md.
    pub average_move_speed_kmh: f64,
}

/// Snapshot of both players' counters at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub frame: usize,
    pub players: BTreeMap<PlayerId, PlayerIntervalStats>,
}

impl StatsRecord {
    /// All-zero record for the given players.
    pub fn zeroed(ids: [PlayerId; 2], frame: usize) -> Self {
        Self {
            frame,
            players: ids
                .iter()
                .map(|&id| (id, PlayerIntervalStats::default()))
                .collect(),
        }
    }
}

fn position_at(
    positions: &[BTreeMap<PlayerId, [f64; 2]>],
    id: PlayerId,
    frame: usize,
) -> Result<[f64; 2], AnalysisError> {
    positions
        .get(frame)
        .and_then(|m| m.get(&id))
        .copied()
        .ok_or(AnalysisError::MissingPlayer { id, frame })
}

fn ball_at(ball: &[Option<[f64; 2]>], frame: usize) -> Result<[f64; 2], AnalysisError> {
    ball.get(frame)
        .copied()
        .flatten()
        .ok_or(AnalysisError::MissingBall { frame })
}

/// Fold shot intervals into accumulated stats records.
///
/// Positions are mini-court pixel coordinates from
/// [`MiniCourt::convert_streams`]. One record is produced per interval,
/// stamped with the interval START frame (the moment of the shot). Missing
/// player or ball positions at a boundary frame fail loudly; they signal an
/// upstream selection bug, not a recoverable gap.
pub fn aggregate(
    shot_frames: &[usize],
    player_positions: &[BTreeMap<PlayerId, [f64; 2]>],
    ball_positions: &[Option<[f64; 2]>],
    court: &MiniCourt,
    ids: [PlayerId; 2],
    cfg: &StatsConfig,
) -> Result<Vec<StatsRecord>, AnalysisError> {
    if shot_frames.len() >= 2 && ball_positions.iter().all(Option::is_none) {
        return Err(AnalysisError::NoBallDetections);
    }

    let mut records = Vec::with_capacity(shot_frames.len().saturating_sub(1));
    let mut prev = StatsRecord::zeroed(ids, 0);

    for pair in shot_frames.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let seconds = (end - start) as f64 / cfg.fps;

        let ball_start = ball_at(ball_positions, start)?;
        let ball_end = ball_at(ball_positions, end)?;
        let ball_speed_kmh =
            court.pixels_to_meters(point_distance(ball_start, ball_end)) / seconds * MS_TO_KMH;

        // Shooter: player nearest the ball at the moment of the shot. The
        // ids array is ascending, so a distance tie resolves to the lower id.
        let d0 = point_distance(position_at(player_positions, ids[0], start)?, ball_start);
        let d1 = point_distance(position_at(player_positions, ids[1], start)?, ball_start);
        let (shooter, opponent) = if d0 <= d1 {
            (ids[0], ids[1])
        } else {
            (ids[1], ids[0])
        };

        let opp_start = position_at(player_positions, opponent, start)?;
        let opp_end = position_at(player_positions, opponent, end)?;
        let opp_speed_kmh =
            court.pixels_to_meters(point_distance(opp_start, opp_end)) / seconds * MS_TO_KMH;

        tracing::debug!(
            "shot interval [{}, {}]: player {} at {:.1} km/h, opponent {} moved at {:.1} km/h",
            start,
            end,
            shooter,
            ball_speed_kmh,
            opponent,
            opp_speed_kmh
        );

        let mut rec = prev.clone();
        rec.frame = start;
        {
            let s = rec.players.entry(shooter).or_default();
            s.shot_count += 1;
            s.total_shot_speed_kmh += ball_speed_kmh;
            s.last_shot_speed_kmh = ball_speed_kmh;
            s.average_shot_speed_kmh = s.total_shot_speed_kmh / s.shot_count as f64;
        }
        let shooter_shots = rec.players[&shooter].shot_count;
        {
            let o = rec.players.entry(opponent).or_default();
            o.total_move_speed_kmh += opp_speed_kmh;
            o.last_move_speed_kmh = opp_speed_kmh;
            o.average_move_speed_kmh = o.total_move_speed_kmh / shooter_shots as f64;
        }

        records.push(rec.clone());
        prev = rec;
    }

    Ok(records)
}

/// Expand boundary records into a dense per-frame table.
///
/// Each record is forward-filled until the next boundary; frames before the
/// first boundary carry all-zero stats.
pub fn fill_frame_table(
    records: &[StatsRecord],
    ids: [PlayerId; 2],
    n_frames: usize,
) -> Vec<StatsRecord> {
    let mut out = Vec::with_capacity(n_frames);
    let mut current = StatsRecord::zeroed(ids, 0);
    let mut next = 0usize;

    for frame in 0..n_frames {
        while next < records.len() && records[next].frame <= frame {
            current = records[next].clone();
            next += 1;
        }
        let mut rec = current.clone();
        rec.frame = frame;
        out.push(rec);
    }
    out
}

// ── Tests ────────────────────────────────────────────────────────────────
