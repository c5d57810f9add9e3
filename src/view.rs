//! Render-facing snapshot of the game
//!
//! The renderer never touches [`GameState`] directly; it draws a [`Frame`].

use glam::Vec2;
use serde::Serialize;

use crate::consts::TARGET_ALPHA;
use crate::sim::GameState;

/// Target colour: good targets keep their sprite colour, bad ones are red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tint {
    Plain,
    Bad,
}

impl Tint {
    pub fn rgb(&self) -> u32 {
        match self {
            Tint::Plain => 0xffffff,
            Tint::Bad => 0xff0000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSprite {
    pub id: u32,
    pub position: Vec2,
    /// Sprite rotation in degrees (faces along the track)
    pub rotation: f32,
    pub size: f32,
    pub visible: bool,
    pub tint: Tint,
    /// Packed `0xRRGGBB` colour for `tint`
    pub rgb: u32,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FireLineSprite {
    pub visible: bool,
    pub origin: Vec2,
    pub angle: f32,
    pub length: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub board: Vec2,
    pub turret_position: Vec2,
    pub turret_angle: f32,
    pub fire_line: FireLineSprite,
    pub targets: Vec<TargetSprite>,
    /// Score line: `"{score} {ammo_left}"`
    pub hud_text: String,
    pub round: u32,
    pub game_over: bool,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let options = state.options();
        let center = state.board_center();

        let targets = state
            .targets
            .iter()
            .map(|t| {
                let p = t.point(&state.path);
                let tint = if t.is_bad { Tint::Bad } else { Tint::Plain };
                TargetSprite {
                    id: t.id,
                    position: p.position,
                    rotation: p.tangent_deg,
                    size: t.size,
                    visible: t.visible,
                    tint,
                    rgb: tint.rgb(),
                    alpha: TARGET_ALPHA,
                }
            })
            .collect();

        Self {
            board: Vec2::new(options.board_width, options.board_height),
            turret_position: center,
            turret_angle: state.turret.angle(),
            fire_line: FireLineSprite {
                visible: state.fire_line.visible,
                origin: center,
                angle: state.fire_line.angle,
                length: options.fire_range(),
            },
            targets,
            hud_text: state.round.hud_text(),
            round: state.round_state().round,
            game_over: state.is_game_over(),
        }
    }

    /// Banner to show over the board, if any
    pub fn banner(&self) -> Option<&'static str> {
        self.game_over.then_some("GAME OVER")
    }
}

/// Track outline for drawing, as a closed polyline
pub fn track_outline(state: &GameState, num_points: usize) -> Vec<Vec2> {
    let mut points = state.path.polyline(num_points);
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}
