//! Track Shooter entry point
//!
//! Headless demo: runs the simulation at a fixed timestep with a simple
//! autoplayer standing in for the input collaborator, then prints the final
//! frame as JSON.
//!
//! Usage: `track-shooter [seed] [options.json]`

use track_shooter::consts::{MAX_SUBSTEPS, SIM_DT_MS};
use track_shooter::sim::fire::line_of_fire;
use track_shooter::sim::{GameEvent, GameState, TickInput, segment_intersects_aabb, tick};
use track_shooter::{ConfigError, Frame, GameOptions};

/// Simulated wall-clock frame length (60 Hz display)
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Stop the demo after this much simulated time
const MAX_RUN_MS: f32 = 5.0 * 60.0 * 1000.0;

/// Game instance holding the simulation and the host loop state
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    shots: u32,
}

impl Game {
    fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
            shots: 0,
        }
    }

    /// Run simulation ticks for one display frame
    fn update(&mut self, dt_ms: f32) {
        let dt_ms = dt_ms.min(100.0);
        self.accumulator += dt_ms;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            self.input.fire = self.wants_to_fire();
            tick(&mut self.state, &self.input, SIM_DT_MS);
            self.accumulator -= SIM_DT_MS;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.fire = false;
        }

        for event in self.state.drain_events() {
            match event {
                GameEvent::ShotFired { .. } => self.shots += 1,
                GameEvent::TargetHit { id, bad: true } => log::warn!("Hit bad target {id}"),
                GameEvent::TargetHit { id, bad: false } => log::debug!("Hit target {id}"),
                _ => log::debug!("{event:?}"),
            }
        }
    }

    /// Autoplayer: fire only when the line of fire crosses a good target and
    /// no bad one
    fn wants_to_fire(&self) -> bool {
        let state = &self.state;
        if !state.fire_line.ready(state.is_game_over()) {
            return false;
        }

        let ray = line_of_fire(
            state.board_center(),
            state.turret.angle(),
            state.options().fire_range(),
        );
        let mut good = false;
        for target in state.visible_targets() {
            if segment_intersects_aabb(&ray, &target.bounds(&state.path)) {
                if target.is_bad {
                    return false;
                }
                good = true;
            }
        }
        good
    }
}

fn parse_args() -> Result<(u64, GameOptions), ConfigError> {
    let mut args = std::env::args().skip(1);

    let seed = match args.next() {
        Some(s) => s
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("seed must be an integer, got '{s}'")))?,
        None => 42,
    };
    let options = match args.next() {
        Some(path) => GameOptions::load(path)?,
        None => GameOptions::default(),
    };
    Ok((seed, options))
}

fn run() -> Result<(), ConfigError> {
    let (seed, options) = parse_args()?;
    let mut game = Game::new(GameState::new(options, seed)?);

    let mut elapsed = 0.0;
    while !game.state.is_game_over() && elapsed < MAX_RUN_MS {
        game.update(FRAME_MS);
        elapsed += FRAME_MS;
    }

    let frame = Frame::capture(&game.state);
    log::info!(
        "Finished after {:.1}s: round {}, hud '{}', {} shots{}",
        elapsed / 1000.0,
        frame.round,
        frame.hud_text,
        game.shots,
        frame.banner().map(|b| format!(", {b}")).unwrap_or_default()
    );
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Track Shooter (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
