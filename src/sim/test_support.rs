use std::collections::VecDeque;

use glam::Vec2;

use super::population::{Population, Roller, TargetSpec};

// Replays scripted draws; falls back to fixed values once exhausted.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRolls {
    pub units: VecDeque<f64>,
    pub indices: VecDeque<usize>,
    pub reals: VecDeque<f32>,
}

impl ScriptedRolls {
    pub(crate) fn new(units: &[f64], indices: &[usize]) -> Self {
        Self {
            units: units.iter().copied().collect(),
            indices: indices.iter().copied().collect(),
            reals: VecDeque::new(),
        }
    }
}

impl Roller for ScriptedRolls {
    fn unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.0)
    }

    fn index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0).min(len - 1)
    }

    fn between(&mut self, min: f32, max: f32) -> f32 {
        // Midpoint keeps jitter at zero unless scripted
        self.reals
            .pop_front()
            .unwrap_or((min + max) / 2.0)
            .clamp(min, max)
    }
}

// Small stationary-looking targets: one lap takes a very long time.
pub(crate) fn population_at(fractions: &[f32], bad: &[u32]) -> Population {
    Population {
        targets: fractions
            .iter()
            .enumerate()
            .map(|(i, &path_fraction)| TargetSpec {
                is_bad: bad.contains(&(i as u32)),
                size: 40.0,
                path_fraction,
                duration_ms: 1.0e9,
            })
            .collect(),
        bad_indices: bad.to_vec(),
    }
}

// Turret angle (degrees) that points from `from` at `to`.
pub(crate) fn aim_at(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    crate::normalize_degrees(d.y.atan2(d.x).to_degrees())
}
