//! Track Shooter - a rotating-turret arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (track, targets, turret, shots, rounds)
//! - `options`: Data-driven game balance and viewport scaling
//! - `view`: Render-facing frame snapshot

pub mod options;
pub mod sim;
pub mod view;

pub use options::{ConfigError, GameOptions};
pub use view::Frame;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (120 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical board dimensions
    pub const BOARD_WIDTH: f32 = 750.0;
    pub const BOARD_HEIGHT: f32 = 1334.0;

    /// Smallest population a round can have
    pub const MIN_TARGETS: u32 = 2;
    /// Random phase offset applied to each target's start position
    pub const POSITION_JITTER: f32 = 0.05;
    /// Opacity of target sprites
    pub const TARGET_ALPHA: f32 = 0.8;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Wrap a path fraction into [0, 1)
#[inline]
pub fn wrap_fraction(fraction: f32) -> f32 {
    let f = fraction.rem_euclid(1.0);
    if f >= 1.0 { 0.0 } else { f }
}

/// Unit direction for an angle in degrees (screen space, y down)
#[inline]
pub fn direction_from_degrees(angle: f32) -> Vec2 {
    let rad = angle.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert!((normalize_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!(normalize_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn test_wrap_fraction() {
        assert!((wrap_fraction(1.25) - 0.25).abs() < 1e-6);
        assert!((wrap_fraction(-0.05) - 0.95).abs() < 1e-6);
        assert!(wrap_fraction(-1e-9) < 1.0);
    }

    #[test]
    fn test_direction_from_degrees() {
        let right = direction_from_degrees(0.0);
        assert!((right - Vec2::X).length() < 1e-6);
        // 90 degrees points down the screen
        let down = direction_from_degrees(90.0);
        assert!((down - Vec2::Y).length() < 1e-6);
    }
}
