//! Score, ammo and round progression
//!
//! After every shot the round is settled in a fixed order: clearing the last
//! good target wins the round even if the same shot emptied the magazine;
//! only otherwise does an empty magazine end the game.

use serde::{Deserialize, Serialize};

use super::fire::ShotReport;
use crate::options::GameOptions;

/// Player-facing progress through the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Current round, starting at 1
    pub round: u32,
    pub score: u64,
    /// Combo multiplier applied to the next good hit
    pub multiplier: u32,
    pub ammo_left: u32,
    pub good_targets_left: u32,
    /// Terminal: no shot is accepted once set
    pub game_over: bool,
}

/// What happens after a resolved shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundTransition {
    /// Targets remain and so does ammo
    Continue,
    /// Every good target is down: new population, full magazine
    RoundWon,
    /// Out of ammo with good targets left
    GameOver,
}

/// Owns [`RoundState`] and the scoring rules that mutate it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundStateMachine {
    state: RoundState,
    score_increment: u64,
    max_multiplier: u32,
    max_ammo: u32,
}

impl RoundStateMachine {
    pub fn new(options: &GameOptions) -> Self {
        Self {
            state: RoundState {
                round: 1,
                score: 0,
                multiplier: 1,
                ammo_left: options.max_ammo,
                good_targets_left: 0,
                game_over: false,
            },
            score_increment: options.score_increment,
            max_multiplier: options.max_multiplier,
            max_ammo: options.max_ammo,
        }
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Arm the current round with a fresh population and a full magazine
    pub fn begin_round(&mut self, good_targets: u32) {
        self.state.good_targets_left = good_targets;
        self.state.ammo_left = self.max_ammo;
    }

    /// Move to the next round. Score and multiplier carry over; the caller
    /// arms it with [`Self::begin_round`] once the new population is placed.
    pub fn next_round(&mut self) {
        self.state.round += 1;
    }

    /// Apply a resolved shot: one round of ammo spent, then each hit in order
    pub fn record_shot(&mut self, report: &ShotReport) {
        self.state.ammo_left = self.state.ammo_left.saturating_sub(1);

        for hit in &report.hits {
            if hit.bad {
                self.state.ammo_left = 0;
            } else {
                self.record_good_hit();
            }
        }

        if report.missed() {
            self.state.multiplier = 1;
        }
    }

    fn record_good_hit(&mut self) {
        let s = &mut self.state;
        s.good_targets_left = s.good_targets_left.saturating_sub(1);
        s.score += self.score_increment * s.multiplier as u64;
        s.multiplier = (s.multiplier + 1).min(self.max_multiplier);
    }

    /// Decide what follows the last shot. Round completion is checked first.
    pub fn transition(&self) -> RoundTransition {
        if self.state.good_targets_left == 0 {
            RoundTransition::RoundWon
        } else if self.state.ammo_left == 0 {
            RoundTransition::GameOver
        } else {
            RoundTransition::Continue
        }
    }

    pub fn end_game(&mut self) {
        self.state.game_over = true;
    }

    /// Score line shown in the HUD: `"{score} {ammo_left}"`
    pub fn hud_text(&self) -> String {
        format!("{} {}", self.state.score, self.state.ammo_left)
    }
}
