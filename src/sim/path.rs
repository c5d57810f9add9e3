//! Closed track geometry
//!
//! The track is a rounded rectangle: four straight runs joined by four
//! quarter-circle corners, traversed clockwise on screen (y points down).
//! Positions along the track are arc-length fractions in [0, 1).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::options::GameOptions;
use crate::wrap_fraction;

/// One piece of the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    Line {
        start: Vec2,
        end: Vec2,
    },
    /// Circle arc; angles in degrees, positive sweep turns clockwise on screen
    Arc {
        center: Vec2,
        radius: f32,
        start_deg: f32,
        sweep_deg: f32,
    },
}

impl PathSegment {
    pub fn length(&self) -> f32 {
        match *self {
            PathSegment::Line { start, end } => (end - start).length(),
            PathSegment::Arc {
                radius, sweep_deg, ..
            } => radius * sweep_deg.to_radians().abs(),
        }
    }

    pub fn start(&self) -> Vec2 {
        self.sample(0.0).position
    }

    pub fn end(&self) -> Vec2 {
        self.sample(1.0).position
    }

    /// Point at local parameter `t` in [0, 1]
    pub fn sample(&self, t: f32) -> PathPoint {
        match *self {
            PathSegment::Line { start, end } => {
                let dir = end - start;
                PathPoint {
                    position: start + dir * t,
                    tangent_deg: crate::normalize_degrees(dir.y.atan2(dir.x).to_degrees()),
                }
            }
            PathSegment::Arc {
                center,
                radius,
                start_deg,
                sweep_deg,
            } => {
                let angle = start_deg + sweep_deg * t;
                let rad = angle.to_radians();
                let turn = if sweep_deg >= 0.0 { 90.0 } else { -90.0 };
                PathPoint {
                    position: center + Vec2::new(rad.cos(), rad.sin()) * radius,
                    tangent_deg: crate::normalize_degrees(angle + turn),
                }
            }
        }
    }
}

/// A position on the track with its direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: Vec2,
    /// Direction of travel in degrees (0 = +x, 90 = +y / down)
    pub tangent_deg: f32,
}

/// The closed track all targets follow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPath {
    segments: Vec<PathSegment>,
    /// Cumulative length at the end of each segment
    ends: Vec<f32>,
    total_length: f32,
}

impl TrackPath {
    /// Build the track centered on the board described by `options`
    pub fn new(options: &GameOptions) -> Self {
        let origin = Vec2::new(
            (options.board_width - options.path_width) / 2.0,
            (options.board_height - options.path_height) / 2.0,
        );
        Self::rounded_rect(
            origin,
            options.path_width,
            options.path_height,
            options.curve_radius,
        )
    }

    /// Rounded rectangle starting at the left end of the top run
    pub fn rounded_rect(origin: Vec2, width: f32, height: f32, radius: f32) -> Self {
        let (x0, y0) = (origin.x, origin.y);
        let (x1, y1) = (x0 + width, y0 + height);
        let r = radius;

        let arc = |cx: f32, cy: f32, start_deg: f32| PathSegment::Arc {
            center: Vec2::new(cx, cy),
            radius: r,
            start_deg,
            sweep_deg: 90.0,
        };
        let line = |sx: f32, sy: f32, ex: f32, ey: f32| PathSegment::Line {
            start: Vec2::new(sx, sy),
            end: Vec2::new(ex, ey),
        };

        Self::from_segments(vec![
            line(x0 + r, y0, x1 - r, y0),
            arc(x1 - r, y0 + r, -90.0),
            line(x1, y0 + r, x1, y1 - r),
            arc(x1 - r, y1 - r, 0.0),
            line(x1 - r, y1, x0 + r, y1),
            arc(x0 + r, y1 - r, 90.0),
            line(x0, y1 - r, x0, y0 + r),
            arc(x0 + r, y0 + r, 180.0),
        ])
    }

    /// Build a track from contiguous segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        let mut ends = Vec::with_capacity(segments.len());
        let mut total = 0.0;
        for segment in &segments {
            total += segment.length();
            ends.push(total);
        }
        Self {
            segments,
            ends,
            total_length: total,
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Position and heading at `fraction` of the way around (wraps modulo 1)
    pub fn point_at(&self, fraction: f32) -> PathPoint {
        let distance = wrap_fraction(fraction) * self.total_length;

        let mut segment_start = 0.0;
        for (segment, &end) in self.segments.iter().zip(&self.ends) {
            let length = end - segment_start;
            if distance <= end && length > 0.0 {
                let t = ((distance - segment_start) / length).clamp(0.0, 1.0);
                return segment.sample(t);
            }
            segment_start = end;
        }

        // Float drift past the final end: the loop closes at its start
        self.segments
            .iter()
            .find(|s| s.length() > 0.0)
            .map(|s| s.sample(0.0))
            .unwrap_or(PathPoint {
                position: Vec2::ZERO,
                tangent_deg: 0.0,
            })
    }

    /// Evenly spaced points for drawing the track
    pub fn polyline(&self, num_points: usize) -> Vec<Vec2> {
        (0..num_points)
            .map(|i| self.point_at(i as f32 / num_points.max(1) as f32).position)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    fn default_track() -> TrackPath {
        TrackPath::new(&GameOptions::default())
    }

    #[test]
    fn test_segments_are_contiguous_and_closed() {
        let track = default_track();
        let segments = track.segments();
        assert_eq!(segments.len(), 8);
        for (i, segment) in segments.iter().enumerate() {
            let next = &segments[(i + 1) % segments.len()];
            assert!(
                (segment.end() - next.start()).length() < 1e-3,
                "segment {i} does not meet segment {}",
                (i + 1) % segments.len()
            );
        }
    }

    #[test]
    fn test_total_length() {
        let track = default_track();
        let expected = 2.0 * 400.0 + 2.0 * 700.0 + 2.0 * PI * 50.0;
        assert!((track.total_length() - expected).abs() < 0.01);
    }

    #[test]
    fn test_start_point_and_heading() {
        let track = default_track();
        let start = track.point_at(0.0);
        assert!((start.position - Vec2::new(175.0, 267.0)).length() < 1e-3);
        assert!(start.tangent_deg.abs() < 1e-3);
    }

    #[test]
    fn test_halfway_is_bottom_right_corner_exit() {
        // Top run + corner + right run + corner is exactly half of a
        // symmetric rounded rectangle
        let track = default_track();
        let half = track.point_at(0.5);
        assert!((half.position - Vec2::new(575.0, 1067.0)).length() < 0.05);
        assert!((half.tangent_deg - 180.0).abs() < 0.5);
    }

    #[test]
    fn test_periodic() {
        let track = default_track();
        let a = track.point_at(0.0).position;
        let b = track.point_at(1.0).position;
        assert!((a - b).length() < 1e-3);

        let c = track.point_at(0.3).position;
        let d = track.point_at(1.3).position;
        assert!((c - d).length() < 0.05);
    }

    #[test]
    fn test_heading_on_right_run_is_down() {
        let track = default_track();
        // Middle of the right run
        let distance = 400.0 + 25.0 * PI + 350.0;
        let p = track.point_at(distance / track.total_length());
        assert!((p.position.x - 625.0).abs() < 0.05);
        assert!((p.tangent_deg - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_sharp_corners_when_radius_is_zero() {
        let track = TrackPath::rounded_rect(Vec2::ZERO, 100.0, 50.0, 0.0);
        assert!((track.total_length() - 300.0).abs() < 1e-3);
        let p = track.point_at(0.5);
        assert!((p.position - Vec2::new(100.0, 50.0)).length() < 1e-3);
    }

    #[test]
    fn test_polyline_samples() {
        let points = default_track().polyline(64);
        assert_eq!(points.len(), 64);
    }

    proptest! {
        #[test]
        fn prop_points_stay_on_track_bounds(f in 0.0f32..1.0) {
            let track = default_track();
            let p = track.point_at(f).position;
            prop_assert!(p.x >= 125.0 - 1e-3 && p.x <= 625.0 + 1e-3);
            prop_assert!(p.y >= 267.0 - 1e-3 && p.y <= 1067.0 + 1e-3);
        }

        #[test]
        fn prop_motion_is_continuous(f in 0.0f32..1.0) {
            let track = default_track();
            let step = 1e-3;
            let a = track.point_at(f).position;
            let b = track.point_at(f + step).position;
            // Never further apart than the arc length between them
            prop_assert!((b - a).length() <= track.total_length() * step + 0.05);
        }
    }
}
