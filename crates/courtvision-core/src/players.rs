//! Player selection and stream filtering.
//!
//! The person detector reports everyone in frame: players, ball kids, line
//! judges, spectators near the fence. Only the two people standing on the
//! court matter, so the two boxes whose foot points sit closest to the court
//! keypoints in the reference frame are selected once, and every later frame
//! is filtered down to those two ids.
//!
//! This is selection-once plus best-effort passthrough, not tracking: if a
//! selected id disappears mid-video it is simply absent from those frames and
//! no re-association is attempted.

use crate::detection::{CourtKeypoints, PlayerFrame, PlayerId};
use crate::error::AnalysisError;

/// Number of players retained by the filter.
pub const SELECTED_PLAYERS: usize = 2;

/// Pick the two reference-frame detections closest to the court.
///
/// Boxes are ranked by distance from their foot point to the nearest court
/// keypoint; ties break on the lower id. The returned ids are in ascending
/// order.
pub fn select_players(
    keypoints: &CourtKeypoints,
    reference: &PlayerFrame,
) -> Result<[PlayerId; SELECTED_PLAYERS], AnalysisError> {
    if reference.len() < SELECTED_PLAYERS {
        return Err(AnalysisError::InsufficientPlayers {
            needed: SELECTED_PLAYERS,
            got: reference.len(),
        });
    }

    let mut ranked: Vec<(f64, PlayerId)> = reference
        .iter()
        .map(|(&id, bbox)| (keypoints.nearest_distance(bbox.foot_point()), id))
        .collect();
    // BTreeMap iteration is id-ordered, so equal distances keep the lower id
    // first under a stable sort.
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut ids = [ranked[0].1, ranked[1].1];
    ids.sort_unstable();
    tracing::debug!(
        "selected players {:?} from {} reference detections",
        ids,
        reference.len()
    );
    Ok(ids)
}

/// Restrict every frame of the stream to the selected ids.
///
/// Ids absent from a given frame are dropped for that frame only; the output
/// maps are always a subset of `selected`.
pub fn filter_player_stream(
    stream: &[PlayerFrame],
    selected: [PlayerId; SELECTED_PLAYERS],
) -> Vec<PlayerFrame> {
    let mut incomplete_frames = 0usize;
    let filtered: Vec<PlayerFrame> = stream
        .iter()
        .map(|frame| {
            let kept: PlayerFrame = frame
                .iter()
                .filter(|&(id, _)| selected.contains(id))
                .map(|(&id, &bbox)| (id, bbox))
                .collect();
            if kept.len() < SELECTED_PLAYERS {
                incomplete_frames += 1;
            }
            kept
        })
        .collect();

    if incomplete_frames > 0 {
        tracing::warn!(
            "{} of {} frames are missing at least one selected player",
            incomplete_frames,
            stream.len()
        );
    }
    filtered
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Bbox;

    fn court() -> CourtKeypoints {
        // Court roughly centered around x in [400, 900], y in [200, 800].
        let pts: Vec<[f64; 2]> = (0..14)
            .map(|i| [400.0 + (i % 2) as f64 * 500.0, 200.0 + (i / 2) as f64 * 100.0])
            .collect();
        CourtKeypoints::new(pts).unwrap()
    }

    fn frame(entries: &[(PlayerId, Bbox)]) -> PlayerFrame {
        entries.iter().copied().collect()
    }

    #[test]
    fn selects_the_two_closest_to_court() {
        let reference = frame(&[
            (3, Bbox::new(600.0, 150.0, 650.0, 250.0)),  // near court
            (7, Bbox::new(10.0, 10.0, 60.0, 120.0)),     // far corner
            (9, Bbox::new(500.0, 700.0, 560.0, 820.0)),  // near court
            (12, Bbox::new(1800.0, 50.0, 1850.0, 160.0)), // stands
        ]);
        let ids = select_players(&court(), &reference).unwrap();
        assert_eq!(ids, [3, 9]);
    }

    #[test]
    fn fewer_than_two_detections_errors() {
        let reference = frame(&[(1, Bbox::new(0.0, 0.0, 1.0, 1.0))]);
        let err = select_players(&court(), &reference).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientPlayers { needed: 2, got: 1 });
    }

    #[test]
    fn filtered_stream_only_contains_selected_ids() {
        let b = Bbox::new(0.0, 0.0, 1.0, 1.0);
        let stream = vec![
            frame(&[(3, b), (7, b), (9, b)]),
            frame(&[(7, b), (9, b)]),
            frame(&[(3, b)]),
            frame(&[]),
        ];
        let out = filter_player_stream(&stream, [3, 9]);
        assert_eq!(out.len(), stream.len());
        for f in &out {
            assert!(f.keys().all(|id| [3, 9].contains(id)));
        }
        assert_eq!(out[0].len(), 2);
        assert_eq!(out[1].len(), 1); // id 3 absent this frame, just dropped
        assert_eq!(out[2].len(), 1);
        assert!(out[3].is_empty());
    }
}
