//! Rotating turret
//!
//! The turret spins continuously. Firing speeds it up (thrust); every full
//! rotation slows it down again (friction). Neither can push the time scale
//! outside `[1, max_gun_speed_multiplier]`.

use serde::{Deserialize, Serialize};

use crate::options::GameOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    /// Progress through the current rotation, in [0, 1)
    phase: f32,
    /// Multiplier on the base rotation speed
    time_scale: f32,
    /// Completed rotations since the turret was built
    rotations: u64,

    period_ms: f32,
    thrust: f32,
    friction: f32,
    max_time_scale: f32,
}

impl Turret {
    pub fn new(options: &GameOptions) -> Self {
        Self {
            phase: 0.0,
            time_scale: 1.0,
            rotations: 0,
            period_ms: options.gun_speed,
            thrust: options.gun_thrust,
            friction: options.gun_friction,
            max_time_scale: options.max_gun_speed_multiplier,
        }
    }

    /// Current heading in degrees, [0, 360)
    pub fn angle(&self) -> f32 {
        crate::normalize_degrees(self.phase * 360.0)
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    /// Degrees per millisecond at the current time scale
    pub fn angular_speed(&self) -> f32 {
        360.0 / self.period_ms * self.time_scale
    }

    /// Spin for `dt_ms`. Friction is applied once per completed rotation, at
    /// the moment that rotation completes.
    ///
    /// Returns the number of rotations completed during this step (saturating).
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        if !dt_ms.is_finite() {
            log::warn!("Ignoring non-finite turret step {dt_ms}");
            return 0;
        }
        let period = f64::from(self.period_ms);
        let mut remaining = f64::from(dt_ms.max(0.0));
        let mut completed: u64 = 0;

        while remaining > 0.0 {
            let scale = f64::from(self.time_scale);
            let to_boundary_ms = (1.0 - f64::from(self.phase)) * period / scale;
            if remaining < to_boundary_ms {
                self.phase += (remaining * scale / period) as f32;
                break;
            }
            remaining -= to_boundary_ms;
            self.phase = 0.0;
            completed = completed.saturating_add(1);
            self.apply_friction();

            if self.time_scale <= 1.0 {
                // Friction can no longer change the speed: take whole turns at once
                let whole = (remaining / period).floor();
                completed = completed.saturating_add(whole as u64);
                remaining -= whole * period;
            }
        }

        // Float accumulation can land exactly on 1.0
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        self.rotations = self.rotations.saturating_add(completed);
        u32::try_from(completed).unwrap_or(u32::MAX)
    }

    /// Slow down after a full rotation, never below normal speed
    pub fn apply_friction(&mut self) {
        self.time_scale = (self.time_scale * self.friction).max(1.0);
    }

    /// Speed up after a shot, never above the configured ceiling
    pub fn apply_thrust(&mut self) {
        self.time_scale = (self.time_scale * self.thrust).min(self.max_time_scale);
    }
}
