//! Shot event detection from the ball trajectory.
//!
//! A shot flips the vertical direction of the ball's image trajectory: the
//! ball drops toward the striking player and climbs away again (or the
//! reverse for the far player). The detector smooths the per-frame center-y
//! series with a centered rolling mean, takes sign changes of the first
//! difference as candidate reversals, keeps only candidates with enough
//! vertical travel on both sides, and merges candidates that fall inside the
//! minimum gap, keeping the earlier one.
//!
//! The centered mean means a symmetric reversal is reported on its exact
//! frame; a strongly asymmetric one can shift by up to half the smoothing
//! window.

use crate::config::ShotConfig;
use crate::geom::Bbox;

/// Detect shot (impact) frames in a fully interpolated ball stream.
///
/// Returns a strictly increasing list of frame indices. Trajectories shorter
/// than the smoothing window, or without qualifying reversals, yield an empty
/// list; neither is an error.
pub fn detect_shot_frames(ball: &[Option<Bbox>], cfg: &ShotConfig) -> Vec<usize> {
    // After interpolation the stream is dense from the first detection on.
    let offset = match ball.iter().position(Option::is_some) {
        Some(i) => i,
        None => return Vec::new(),
    };
    let ys: Vec<f64> = ball[offset..]
        .iter()
        .map_while(|b| b.as_ref().map(|b| b.center_y()))
        .collect();

    if ys.len() < cfg.smoothing_window.max(3) {
        tracing::debug!("trajectory too short for shot detection: {} frames", ys.len());
        return Vec::new();
    }

    let smoothed = rolling_mean_centered(&ys, cfg.smoothing_window);

    let mut events: Vec<usize> = Vec::new();
    for i in 1..smoothed.len() - 1 {
        let d_prev = smoothed[i] - smoothed[i - 1];
        let d_next = smoothed[i + 1] - smoothed[i];
        if d_prev * d_next >= 0.0 {
            continue;
        }
        let is_max = d_prev > 0.0;
        if !reversal_is_pronounced(&smoothed, i, is_max, cfg) {
            tracing::debug!("reversal at frame {} below displacement threshold", offset + i);
            continue;
        }

        match events.last() {
            Some(&last) if offset + i < last + cfg.min_gap_frames => {
                // Too close to the previous event; the earlier frame wins.
                tracing::debug!("merging reversal at frame {} into {}", offset + i, last);
            }
            _ => events.push(offset + i),
        }
    }
    events
}

/// Centered rolling mean; window edges are clipped to the series.
fn rolling_mean_centered(ys: &[f64], window: usize) -> Vec<f64> {
    let half = window.max(1) / 2;
    (0..ys.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(ys.len());
            ys[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
        })
        .collect()
}

/// True if the trajectory travels at least `min_displacement_px` on both
/// sides of the extremum at `i`, within `confirm_window` frames each way.
fn reversal_is_pronounced(smoothed: &[f64], i: usize, is_max: bool, cfg: &ShotConfig) -> bool {
    let lo = i.saturating_sub(cfg.confirm_window);
    let hi = (i + cfg.confirm_window + 1).min(smoothed.len());

    let side_extreme = |range: &[f64]| {
        range
            .iter()
            .copied()
            .fold(if is_max { f64::INFINITY } else { f64::NEG_INFINITY }, |acc, v| {
                if is_max {
                    acc.min(v)
                } else {
                    acc.max(v)
                }
            })
    };

    let before = side_extreme(&smoothed[lo..i]);
    let after = side_extreme(&smoothed[i + 1..hi]);
    let rise = (smoothed[i] - before).abs();
    let fall = (smoothed[i] - after).abs();
    rise >= cfg.min_displacement_px && fall >= cfg.min_displacement_px
}

// ── Tests ────────────────────────────────────────────────────────────────
