//! Canonical court model and video-pixel → mini-court projection.
//!
//! The mini-court is a fixed-size top-down rectangle with real-world tennis
//! court proportions. Projecting detections into it gives every downstream
//! consumer (speed math, rendering) a common coordinate space that is
//! independent of camera framing.
//!
//! The mapping is a per-axis proportional scaling from the axis-aligned
//! extent of the 14 detected pixel keypoints onto the canonical court
//! rectangle, computed once per video. This rests on the static,
//! fronto-parallel camera assumption; everything that depends on it is
//! isolated behind [`MiniCourt`] so a full homography (DLT from the 14
//! correspondences) can replace it without touching shot detection or stats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::detection::{BallFrame, CourtKeypoints, PlayerFrame, PlayerId, COURT_KEYPOINT_COUNT};
use crate::error::AnalysisError;

// ── Real-world court dimensions (meters) ─────────────────────────────────

/// Doubles court width (sideline to sideline).
pub const DOUBLES_COURT_WIDTH_M: f64 = 10.97;
/// Full court length (baseline to baseline).
pub const COURT_LENGTH_M: f64 = 23.77;
/// Singles court width.
pub const SINGLES_COURT_WIDTH_M: f64 = 8.23;
/// Doubles alley width (doubles sideline to singles sideline).
pub const DOUBLES_ALLEY_WIDTH_M: f64 = 1.37;
/// Baseline to service line ("no man's land" depth): half court minus the
/// net-to-service-line distance.
pub const NO_MANS_LAND_DEPTH_M: f64 = 5.485;
/// Net to service line.
pub const SERVICE_LINE_FROM_NET_M: f64 = 6.40;

// ── Canvas constants (mini-court pixels) ─────────────────────────────────

/// Width of the mini-court overlay canvas.
pub const CANVAS_WIDTH_PX: f64 = 250.0;
/// Height of the mini-court overlay canvas.
pub const CANVAS_HEIGHT_PX: f64 = 500.0;
/// Padding between the canvas edge and the court rectangle.
pub const CANVAS_PADDING_PX: f64 = 20.0;

// ── Scale conversions ────────────────────────────────────────────────────

/// Convert a pixel distance to meters given a reference length visible in
/// both units (e.g. the doubles court width).
pub fn pixel_distance_to_meters(pixel_distance: f64, reference_m: f64, reference_px: f64) -> f64 {
    pixel_distance * reference_m / reference_px
}

/// Inverse of [`pixel_distance_to_meters`].
pub fn meters_to_pixel_distance(meters: f64, reference_m: f64, reference_px: f64) -> f64 {
    meters * reference_px / reference_m
}

// ── Mini-court model ─────────────────────────────────────────────────────

/// Canonical court rectangle plus the fixed video→mini-court mapping.
///
/// Built once per video from the reference-frame keypoints; every frame's
/// detections share the same transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiniCourt {
    /// Top-left of the court rectangle on the canvas.
    origin: [f64; 2],
    /// Court rectangle width on the canvas (maps the doubles width).
    court_width_px: f64,
    /// Court rectangle length on the canvas (maps the court length).
    court_length_px: f64,
    /// Mini-court pixels per real-world meter.
    px_per_meter: f64,
    /// Minimum corner of the pixel keypoint extent in video space.
    src_min: [f64; 2],
    /// Size of the pixel keypoint extent in video space.
    src_size: [f64; 2],
    /// The 14 canonical keypoints in mini-court pixel space.
    keypoints: [[f64; 2]; COURT_KEYPOINT_COUNT],
}

impl MiniCourt {
    /// Build the model and the fixed projection from the reference-frame
    /// keypoints.
    pub fn new(court_keypoints: &CourtKeypoints) -> Result<Self, AnalysisError> {
        let (src_min, src_max) = court_keypoints.extent();
        let src_size = [src_max[0] - src_min[0], src_max[1] - src_min[1]];
        if src_size[0] <= 0.0 || src_size[1] <= 0.0 {
            return Err(AnalysisError::DegenerateKeypoints);
        }

        let court_width_px = CANVAS_WIDTH_PX - 2.0 * CANVAS_PADDING_PX;
        let px_per_meter = court_width_px / DOUBLES_COURT_WIDTH_M;
        let court_length_px = COURT_LENGTH_M * px_per_meter;
        let origin = [CANVAS_PADDING_PX, CANVAS_PADDING_PX];

        Ok(Self {
            origin,
            court_width_px,
            court_length_px,
            px_per_meter,
            src_min,
            src_size,
            keypoints: canonical_keypoints(origin, court_width_px, court_length_px, px_per_meter),
        })
    }

    /// Map a video-pixel point into mini-court pixel space.
    ///
    /// Deterministic and stateless: the same point always maps to the same
    /// output for a given model.
    pub fn project_point(&self, p: [f64; 2]) -> [f64; 2] {
        let extent = [self.court_width_px, self.court_length_px];
        let mut out = [0.0; 2];
        for axis in 0..2 {
            let t = (p[axis] - self.src_min[axis]) / self.src_size[axis];
            out[axis] = self.origin[axis] + t * extent[axis];
        }
        out
    }

    /// Project player and ball streams into mini-court space.
    ///
    /// Players are projected through their foot point (ground contact), the
    /// ball through its box center. The id/frame structure of the inputs is
    /// preserved, including gaps.
    pub fn convert_streams(
        &self,
        players: &[PlayerFrame],
        ball: &[BallFrame],
    ) -> (Vec<BTreeMap<PlayerId, [f64; 2]>>, Vec<Option<[f64; 2]>>) {
        let player_positions = players
            .iter()
            .map(|frame| {
                frame
                    .iter()
                    .map(|(&id, bbox)| (id, self.project_point(bbox.foot_point())))
                    .collect()
            })
            .collect();
        let ball_positions = ball
            .iter()
            .map(|slot| slot.as_ref().map(|bbox| self.project_point(bbox.center())))
            .collect();
        (player_positions, ball_positions)
    }

    /// Convert a mini-court pixel distance to meters.
    pub fn pixels_to_meters(&self, pixel_distance: f64) -> f64 {
        pixel_distance_to_meters(pixel_distance, DOUBLES_COURT_WIDTH_M, self.court_width_px)
    }

    /// Convert a real-world distance to mini-court pixels.
    pub fn meters_to_pixels(&self, meters: f64) -> f64 {
        meters_to_pixel_distance(meters, DOUBLES_COURT_WIDTH_M, self.court_width_px)
    }

    /// The 14 canonical keypoints in mini-court pixel space, in the same
    /// order as the detected pixel keypoints. Intended for renderers.
    pub fn keypoints(&self) -> &[[f64; 2]; COURT_KEYPOINT_COUNT] {
        &self.keypoints
    }

    /// Mini-court pixels per meter.
    pub fn px_per_meter(&self) -> f64 {
        self.px_per_meter
    }

    /// Canvas size `[width, height]` for renderers.
    pub fn canvas_size(&self) -> [f64; 2] {
        [CANVAS_WIDTH_PX, CANVAS_HEIGHT_PX]
    }
}

/// Canonical mini-court keypoints for the default canvas, independent of any
/// video calibration. Intended for renderers and tooling.
pub fn default_canonical_keypoints() -> [[f64; 2]; COURT_KEYPOINT_COUNT] {
    let court_width_px = CANVAS_WIDTH_PX - 2.0 * CANVAS_PADDING_PX;
    let px_per_meter = court_width_px / DOUBLES_COURT_WIDTH_M;
    canonical_keypoints(
        [CANVAS_PADDING_PX, CANVAS_PADDING_PX],
        court_width_px,
        COURT_LENGTH_M * px_per_meter,
        px_per_meter,
    )
}

/// Lay out the canonical keypoints from the court constants.
///
/// Index order matches the keypoint detector: doubles corners (0–3), singles
/// sideline endpoints (4–7), service line endpoints (8–11), center service
/// "T" points (12–13).
fn canonical_keypoints(
    origin: [f64; 2],
    width: f64,
    length: f64,
    px_per_meter: f64,
) -> [[f64; 2]; COURT_KEYPOINT_COUNT] {
    let [ox, oy] = origin;
    let alley = DOUBLES_ALLEY_WIDTH_M * px_per_meter;
    let service = NO_MANS_LAND_DEPTH_M * px_per_meter;

    let left = ox + alley;
    let right = ox + width - alley;
    let top_service = oy + service;
    let bottom_service = oy + length - service;
    let center_x = ox + width * 0.5;

    [
        [ox, oy],
        [ox + width, oy],
        [ox, oy + length],
        [ox + width, oy + length],
        [left, oy],
        [left, oy + length],
        [right, oy],
        [right, oy + length],
        [left, top_service],
        [right, top_service],
        [left, bottom_service],
        [right, bottom_service],
        [center_x, top_service],
        [center_x, bottom_service],
    ]
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Bbox;
    use crate::test_utils::{pixel_keypoints, player_frame};
    use approx::assert_relative_eq;

    #[test]
    fn projection_is_deterministic() {
        let court = MiniCourt::new(&pixel_keypoints()).unwrap();
        let p = [512.3, 377.9];
        assert_eq!(court.project_point(p), court.project_point(p));

        // Rebuilding from the same keypoints gives the same mapping.
        let again = MiniCourt::new(&pixel_keypoints()).unwrap();
        assert_eq!(court.project_point(p), again.project_point(p));
    }

    #[test]
    fn keypoint_extent_maps_to_court_rectangle() {
        let kp = pixel_keypoints();
        let court = MiniCourt::new(&kp).unwrap();
        let (min, max) = kp.extent();

        let tl = court.project_point(min);
        assert_relative_eq!(tl[0], CANVAS_PADDING_PX, epsilon = 1e-9);
        assert_relative_eq!(tl[1], CANVAS_PADDING_PX, epsilon = 1e-9);

        let br = court.project_point(max);
        assert_relative_eq!(br[0], CANVAS_WIDTH_PX - CANVAS_PADDING_PX, epsilon = 1e-9);
        let expected_length =
            COURT_LENGTH_M * (CANVAS_WIDTH_PX - 2.0 * CANVAS_PADDING_PX) / DOUBLES_COURT_WIDTH_M;
        assert_relative_eq!(br[1], CANVAS_PADDING_PX + expected_length, epsilon = 1e-9);
    }

    #[test]
    fn meters_pixels_round_trip() {
        let d = 137.25;
        let back = meters_to_pixel_distance(
            pixel_distance_to_meters(d, DOUBLES_COURT_WIDTH_M, 210.0),
            DOUBLES_COURT_WIDTH_M,
            210.0,
        );
        assert_relative_eq!(back, d, max_relative = 1e-6);

        let court = MiniCourt::new(&pixel_keypoints()).unwrap();
        assert_relative_eq!(
            court.meters_to_pixels(court.pixels_to_meters(d)),
            d,
            max_relative = 1e-6
        );
    }

    #[test]
    fn canonical_keypoints_respect_court_proportions() {
        let court = MiniCourt::new(&pixel_keypoints()).unwrap();
        let kp = court.keypoints();

        // Doubles corners frame the court rectangle.
        assert_eq!(kp[0], [CANVAS_PADDING_PX, CANVAS_PADDING_PX]);
        assert_relative_eq!(kp[3][0], CANVAS_WIDTH_PX - CANVAS_PADDING_PX, epsilon = 1e-9);

        // Singles sidelines sit one alley width inside the doubles lines.
        let alley_px = court.meters_to_pixels(DOUBLES_ALLEY_WIDTH_M);
        assert_relative_eq!(kp[4][0] - kp[0][0], alley_px, epsilon = 1e-9);
        assert_relative_eq!(kp[1][0] - kp[6][0], alley_px, epsilon = 1e-9);

        // Singles width checks out against the alley layout.
        assert_relative_eq!(
            court.pixels_to_meters(kp[9][0] - kp[8][0]),
            SINGLES_COURT_WIDTH_M,
            epsilon = 1e-9
        );

        // Service lines: no-man's-land from the baseline, service distance
        // from the net.
        assert_relative_eq!(
            court.pixels_to_meters(kp[8][1] - kp[0][1]),
            NO_MANS_LAND_DEPTH_M,
            epsilon = 1e-9
        );
        let net_y = (kp[0][1] + kp[2][1]) * 0.5;
        assert_relative_eq!(
            court.pixels_to_meters(net_y - kp[8][1]),
            SERVICE_LINE_FROM_NET_M,
            epsilon = 1e-9
        );

        // "T" points sit on the center line.
        assert_relative_eq!(kp[12][0], (kp[8][0] + kp[9][0]) * 0.5, epsilon = 1e-9);
    }

    #[test]
    fn stream_conversion_preserves_structure() {
        let court = MiniCourt::new(&pixel_keypoints()).unwrap();
        let b = Bbox::new(600.0, 300.0, 640.0, 400.0);
        let players = vec![
            player_frame(&[(1, b), (2, b)]),
            player_frame(&[(2, b)]),
            player_frame(&[]),
        ];
        let ball = vec![Some(b), None, Some(b)];

        let (p_out, b_out) = court.convert_streams(&players, &ball);
        assert_eq!(p_out.len(), 3);
        assert_eq!(p_out[0].len(), 2);
        assert_eq!(p_out[1].len(), 1);
        assert!(p_out[2].is_empty());
        assert!(b_out[0].is_some());
        assert!(b_out[1].is_none());

        // Player goes through the foot point, ball through the center.
        assert_eq!(p_out[0][&1], court.project_point(b.foot_point()));
        assert_eq!(b_out[0].unwrap(), court.project_point(b.center()));
    }

    #[test]
    fn degenerate_keypoints_are_rejected() {
        let kp = CourtKeypoints::new(vec![[100.0, 100.0]; 14]).unwrap();
        assert_eq!(MiniCourt::new(&kp).unwrap_err(), AnalysisError::DegenerateKeypoints);
    }
}
