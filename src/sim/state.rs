//! Game state and events
//!
//! Everything one running game needs lives in [`GameState`]. It is plain
//! owned data advanced by [`super::tick::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fire::FireLine;
use super::path::TrackPath;
use super::population::{Population, PopulationGenerator};
use super::round::{RoundState, RoundStateMachine};
use super::target::Target;
use super::timers::Timers;
use super::turret::Turret;
use crate::options::{ConfigError, GameOptions};

/// Something that happened during a tick, for audio/render collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: u32, targets: u32, bad: u32 },
    ShotFired { angle: f32 },
    TargetHit { id: u32, bad: bool },
    ShotMissed,
    RoundWon { round: u32 },
    GameOver { score: u64, round: u32 },
}

/// Complete state of a running game
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) options: GameOptions,
    pub(crate) rng: Pcg32,
    pub(crate) generator: PopulationGenerator,
    pub path: TrackPath,
    /// Current round's targets, in creation order
    pub targets: Vec<Target>,
    pub turret: Turret,
    pub fire_line: FireLine,
    pub round: RoundStateMachine,
    pub timers: Timers,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Start a game: validates `options` and rolls the first round
    pub fn new(options: GameOptions, seed: u64) -> Result<Self, ConfigError> {
        let mut state = Self::empty(options, seed)?;
        super::tick::generate_round(&mut state);
        Ok(state)
    }

    /// Start a game whose first round uses a prepared population.
    /// The population's bad indices must agree with its targets' flags.
    pub fn with_population(
        options: GameOptions,
        seed: u64,
        population: Population,
    ) -> Result<Self, ConfigError> {
        population.check()?;
        let mut state = Self::empty(options, seed)?;
        state.install_population(population);
        Ok(state)
    }

    fn empty(options: GameOptions, seed: u64) -> Result<Self, ConfigError> {
        options.validate()?;
        log::info!("New game with seed {seed}");

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            generator: PopulationGenerator::new(&options),
            path: TrackPath::new(&options),
            targets: Vec::new(),
            turret: Turret::new(&options),
            fire_line: FireLine::default(),
            round: RoundStateMachine::new(&options),
            timers: Timers::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            options,
        })
    }

    /// Throw the game away and start over from round 1, continuing the RNG stream
    pub fn restart(&mut self) {
        log::info!("Restarting game");
        self.targets.clear();
        self.turret = Turret::new(&self.options);
        self.fire_line = FireLine::default();
        self.round = RoundStateMachine::new(&self.options);
        self.timers.clear();
        self.events.clear();
        super::tick::generate_round(self);
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn round_state(&self) -> &RoundState {
        self.round.state()
    }

    pub fn is_game_over(&self) -> bool {
        self.round.is_game_over()
    }

    /// Turret position: the center of the board
    pub fn board_center(&self) -> Vec2 {
        Vec2::new(self.options.board_width, self.options.board_height) / 2.0
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace every target with `population` and arm the current round
    pub(crate) fn install_population(&mut self, population: Population) {
        let good = population.good_count();
        self.targets.clear();
        for spec in &population.targets {
            let id = self.next_entity_id();
            self.targets.push(Target::from_spec(id, spec));
        }
        self.round.begin_round(good);

        let round = self.round.state().round;
        log::info!(
            "Round {}: {} targets, bad indices {:?}",
            round,
            population.target_count(),
            population.bad_indices
        );
        self.push_event(GameEvent::RoundStarted {
            round,
            targets: population.target_count(),
            bad: population.bad_indices.len() as u32,
        });
    }

    pub fn visible_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.visible)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
