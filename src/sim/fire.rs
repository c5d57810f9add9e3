//! Shot resolution
//!
//! A shot is a ray from the board center along the turret heading. Every
//! visible target whose bounds the ray crosses is hit, in creation order.
//! A bad hit does not stop the sweep: later targets on the same ray are
//! still hit and still score.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Segment, segment_intersects_aabb};
use super::path::TrackPath;
use super::target::Target;

/// The visible trace of the last shot. While it shows, the turret can't fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FireLine {
    pub visible: bool,
    /// Heading of the last shot, degrees
    pub angle: f32,
}

impl FireLine {
    /// Whether a fire trigger would be accepted right now
    pub fn ready(&self, game_over: bool) -> bool {
        !self.visible && !game_over
    }

    pub fn show(&mut self, angle: f32) {
        self.visible = true;
        self.angle = angle;
    }

    pub fn clear(&mut self) {
        self.visible = false;
    }
}

/// One target struck by a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub target_id: u32,
    pub bad: bool,
}

/// Everything a shot struck, in target creation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotReport {
    pub ray: Segment,
    pub hits: Vec<Hit>,
}

impl ShotReport {
    pub fn missed(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn hit_bad(&self) -> bool {
        self.hits.iter().any(|h| h.bad)
    }

    pub fn good_hits(&self) -> usize {
        self.hits.iter().filter(|h| !h.bad).count()
    }
}

/// Hide and report every visible target crossed by `ray`
pub fn resolve_shot(targets: &mut [Target], path: &TrackPath, ray: Segment) -> ShotReport {
    let mut hits = Vec::new();
    for target in targets.iter_mut().filter(|t| t.visible) {
        if segment_intersects_aabb(&ray, &target.bounds(path)) {
            target.visible = false;
            hits.push(Hit {
                target_id: target.id,
                bad: target.is_bad,
            });
        }
    }
    ShotReport { ray, hits }
}

/// Line of fire from `origin` along `angle_deg`
pub fn line_of_fire(origin: Vec2, angle_deg: f32, range: f32) -> Segment {
    Segment::from_angle(origin, angle_deg, range)
}
