//! Ball trajectory interpolation.
//!
//! The ball detector misses the ball on many frames (motion blur, occlusion
//! by a player, the ball leaving the frame). Shot detection and speed math
//! need a dense trajectory, so interior gaps are filled by linear
//! interpolation between the nearest detections and trailing gaps hold the
//! last known box. Frames before the first detection stay empty; there is
//! nothing to anchor an interpolation there and callers must tolerate it.

use crate::geom::{lerp_bbox, Bbox};

/// Fill gaps in a per-frame ball detection stream.
///
/// Output has the same length as the input. Every frame from the first
/// detection onward is `Some`; an all-empty input passes through unchanged.
pub fn interpolate_ball_stream(stream: &[Option<Bbox>]) -> Vec<Option<Bbox>> {
    let mut out = stream.to_vec();

    let first = match out.iter().position(Option::is_some) {
        Some(i) => i,
        None => return out,
    };

    let mut prev = first;
    let mut i = first + 1;
    while i < out.len() {
        if out[i].is_some() {
            prev = i;
            i += 1;
            continue;
        }

        match out[i..].iter().position(Option::is_some) {
            Some(offset) => {
                let next = i + offset;
                let a = out[prev].expect("prev indexes a detection");
                let b = out[next].expect("next indexes a detection");
                let span = (next - prev) as f64;
                for gap in i..next {
                    let t = (gap - prev) as f64 / span;
                    out[gap] = Some(lerp_bbox(&a, &b, t));
                }
                prev = next;
                i = next + 1;
            }
            None => {
                // Trailing gap: hold the last known box.
                let last = out[prev];
                for slot in out.iter_mut().skip(i) {
                    *slot = last;
                }
                break;
            }
        }
    }

    out
}

// ── Tests ────────────────────────────────────────────────────────────────
