//! Shot collision detection
//!
//! A shot is a finite line segment from the turret; targets are tested by
//! their axis-aligned bounding boxes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Bounds of a `size`x`size` square centered at `center`, rotated by
    /// `rotation_deg`
    pub fn rotated_square(center: Vec2, size: f32, rotation_deg: f32) -> Self {
        let rad = rotation_deg.to_radians();
        let half = size / 2.0 * (rad.cos().abs() + rad.sin().abs());
        Self::from_center(center, Vec2::splat(half))
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

/// A line segment, e.g. the line of fire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Segment of `length` from `origin` heading `angle_deg`
    pub fn from_angle(origin: Vec2, angle_deg: f32, length: f32) -> Self {
        Self::new(origin, origin + crate::direction_from_degrees(angle_deg) * length)
    }
}

/// Whether a segment touches a box (crossing an edge or lying inside it)
///
/// Slab test clipped to the segment's parameter range [0, 1].
pub fn segment_intersects_aabb(segment: &Segment, aabb: &Aabb) -> bool {
    let delta = segment.end - segment.start;
    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;

    for axis in 0..2 {
        let origin = segment.start[axis];
        let d = delta[axis];
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

        if d.abs() < f32::EPSILON {
            // Parallel to this slab: must already be inside it
            if origin < lo || origin > hi {
                return false;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (lo - origin) * inv;
        let mut t1 = (hi - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return false;
        }
    }

    true
}
