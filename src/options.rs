//! Game balance options
//!
//! One immutable value per run. The layout collaborator may derive a rescaled
//! copy once before the first round via [`GameOptions::scaled_for_viewport`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH, MIN_TARGETS};

/// Configuration errors. All of these are contract violations that must stop
/// the game before the first round.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid option: {0}")]
    Invalid(String),
    #[error("could not read options file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse options: {0}")]
    Json(#[from] serde_json::Error),
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

/// Milliseconds a target needs to run once around the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            min: 6000.0,
            max: 10000.0,
            default: 8000.0,
        }
    }
}

/// Target sprite side length, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self {
            min: 100.0,
            max: 200.0,
        }
    }
}

/// Game balance options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    // === Board & track ===
    /// Logical board width (the turret sits at the board center)
    pub board_width: f32,
    /// Logical board height
    pub board_height: f32,
    /// Width of the track, in pixels
    pub path_width: f32,
    /// Height of the track, in pixels
    pub path_height: f32,
    /// Radius of the track corners, in pixels
    pub curve_radius: f32,

    // === Targets ===
    /// Upper bound of the per-round target count (lower bound is 2)
    pub max_targets: u32,
    pub target_speed: SpeedRange,
    pub target_size: SizeRange,

    // === Turret ===
    /// Milliseconds for one full turret rotation at time scale 1
    pub gun_speed: f32,
    /// Time scale multiplier applied on every shot
    pub gun_thrust: f32,
    /// Time scale ceiling
    pub max_gun_speed_multiplier: f32,
    /// Time scale multiplier applied after each full rotation
    pub gun_friction: f32,
    /// Milliseconds the fire line stays visible (no shots meanwhile)
    pub fire_line_ms: f32,

    // === Scoring ===
    pub score_increment: u64,
    /// Highest combo multiplier
    pub max_multiplier: u32,
    pub max_ammo: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            path_width: 500.0,
            path_height: 800.0,
            curve_radius: 50.0,

            max_targets: 5,
            target_speed: SpeedRange::default(),
            target_size: SizeRange::default(),

            gun_speed: 5000.0,
            gun_thrust: 2.0,
            max_gun_speed_multiplier: 5.0,
            gun_friction: 0.9,
            fire_line_ms: 75.0,

            score_increment: 1,
            max_multiplier: 10,
            max_ammo: 6,
        }
    }
}

impl GameOptions {
    /// Parse options from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json(&json)?;
        log::info!("Loaded game options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Check every option contract. Called before any round is generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_targets < MIN_TARGETS {
            return Err(invalid(format!(
                "max_targets must be at least {MIN_TARGETS}, got {}",
                self.max_targets
            )));
        }
        if !(self.board_width > 0.0 && self.board_height > 0.0) {
            return Err(invalid("board dimensions must be positive"));
        }
        if !(self.path_width > 0.0 && self.path_height > 0.0) {
            return Err(invalid("path dimensions must be positive"));
        }
        if self.path_width > self.board_width || self.path_height > self.board_height {
            return Err(invalid("path does not fit on the board"));
        }
        if !(self.curve_radius >= 0.0)
            || self.curve_radius * 2.0 > self.path_width.min(self.path_height)
        {
            return Err(invalid(format!(
                "curve_radius {} does not fit a {}x{} path",
                self.curve_radius, self.path_width, self.path_height
            )));
        }

        let speed = &self.target_speed;
        if !(speed.min > 0.0 && speed.min <= speed.default && speed.default <= speed.max) {
            return Err(invalid(format!(
                "target_speed must satisfy 0 < min <= default <= max, got {}/{}/{}",
                speed.min, speed.default, speed.max
            )));
        }
        let size = &self.target_size;
        if !(size.min > 0.0 && size.min <= size.max) {
            return Err(invalid(format!(
                "target_size must satisfy 0 < min <= max, got {}..{}",
                size.min, size.max
            )));
        }

        if !(self.gun_speed > 0.0) {
            return Err(invalid("gun_speed must be positive"));
        }
        if !(self.gun_thrust > 1.0) {
            return Err(invalid("gun_thrust must be greater than 1"));
        }
        if !(self.gun_friction > 0.0 && self.gun_friction < 1.0) {
            return Err(invalid("gun_friction must be in (0, 1)"));
        }
        if !(self.max_gun_speed_multiplier >= 1.0) {
            return Err(invalid("max_gun_speed_multiplier must be at least 1"));
        }
        if !(self.fire_line_ms >= 0.0) {
            return Err(invalid("fire_line_ms must not be negative"));
        }

        if self.max_multiplier == 0 {
            return Err(invalid("max_multiplier must be at least 1"));
        }
        if self.max_ammo == 0 {
            return Err(invalid("max_ammo must be at least 1"));
        }
        Ok(())
    }

    /// Derive options that fit a viewport's aspect ratio.
    ///
    /// The board keeps its height and takes the viewport's aspect ratio. Track
    /// dimensions scale with the board axis they lie on; corner radius and
    /// target sizes scale with the smaller of the two factors so they never
    /// outgrow the track.
    pub fn scaled_for_viewport(
        &self,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<Self, ConfigError> {
        if !(viewport_width > 0.0 && viewport_height > 0.0) {
            return Err(invalid(format!(
                "viewport must be positive, got {viewport_width}x{viewport_height}"
            )));
        }

        let board_width = self.board_height * viewport_width / viewport_height;
        let sx = board_width / self.board_width;
        let uniform = sx.min(1.0);

        let scaled = Self {
            board_width,
            path_width: self.path_width * sx,
            curve_radius: self.curve_radius * uniform,
            target_size: SizeRange {
                min: self.target_size.min * uniform,
                max: self.target_size.max * uniform,
            },
            ..self.clone()
        };
        scaled.validate()?;

        log::info!(
            "Scaled board for {}x{} viewport: board {:.0}x{:.0}, path {:.0}x{:.0}",
            viewport_width,
            viewport_height,
            scaled.board_width,
            scaled.board_height,
            scaled.path_width,
            scaled.path_height
        );
        Ok(scaled)
    }

    /// Length of the shot ray: half the board's larger dimension
    pub fn fire_range(&self) -> f32 {
        self.board_width.max(self.board_height) / 2.0
    }
}
