//! Targets riding the track

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::path::{PathPoint, TrackPath};
use super::population::TargetSpec;
use crate::wrap_fraction;

/// A target following the track in an endless loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub is_bad: bool,
    /// Hidden targets were hit this round; they keep moving but can't be hit
    pub visible: bool,
    /// Sprite side length in pixels
    pub size: f32,
    /// Position along the track in [0, 1)
    pub path_fraction: f32,
    /// Milliseconds per lap
    pub duration_ms: f32,
}

impl Target {
    pub fn from_spec(id: u32, spec: &TargetSpec) -> Self {
        Self {
            id,
            is_bad: spec.is_bad,
            visible: true,
            size: spec.size,
            path_fraction: wrap_fraction(spec.path_fraction),
            duration_ms: spec.duration_ms,
        }
    }

    /// Move along the track by `dt_ms`, wrapping at the end of the lap
    pub fn advance(&mut self, dt_ms: f32) {
        self.path_fraction = wrap_fraction(self.path_fraction + dt_ms / self.duration_ms);
    }

    pub fn point(&self, path: &TrackPath) -> PathPoint {
        path.point_at(self.path_fraction)
    }

    /// Screen bounds of the sprite, which is rotated to face along the track
    pub fn bounds(&self, path: &TrackPath) -> Aabb {
        let p = self.point(path);
        Aabb::rotated_square(p.position, self.size, p.tangent_deg)
    }
}
