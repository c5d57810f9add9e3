//! Fixed timestep simulation tick
//!
//! Order within a tick: due timers fire, the turret spins, targets move, then
//! the fire trigger (if any) is resolved against the updated positions.

use super::fire::{line_of_fire, resolve_shot};
use super::round::RoundTransition;
use super::state::{GameEvent, GameState};
use super::timers::ScheduledTask;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire trigger (click/tap/space)
    pub fire: bool,
}

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    state.time_ticks += 1;

    for task in state.timers.advance(dt_ms) {
        match task {
            ScheduledTask::ClearFireLine => state.fire_line.clear(),
        }
    }

    let rotations = state.turret.advance(dt_ms);
    if rotations > 0 {
        log::trace!(
            "Turret completed {} rotation(s), time scale now {:.3}",
            rotations,
            state.turret.time_scale()
        );
    }

    for target in &mut state.targets {
        target.advance(dt_ms);
    }

    if input.fire {
        fire(state);
    }
}

/// Handle a fire trigger. Returns false if the shot was refused because the
/// fire line is still showing or the game is over.
pub fn fire(state: &mut GameState) -> bool {
    if !state.fire_line.ready(state.round.is_game_over()) {
        return false;
    }

    let angle = state.turret.angle();
    state.fire_line.show(angle);
    state.turret.apply_thrust();
    state
        .timers
        .schedule(state.options.fire_line_ms, ScheduledTask::ClearFireLine);
    state.push_event(GameEvent::ShotFired { angle });

    let ray = line_of_fire(state.board_center(), angle, state.options.fire_range());
    let report = resolve_shot(&mut state.targets, &state.path, ray);
    state.round.record_shot(&report);

    for hit in &report.hits {
        state.push_event(GameEvent::TargetHit {
            id: hit.target_id,
            bad: hit.bad,
        });
    }
    if report.missed() {
        state.push_event(GameEvent::ShotMissed);
    }
    log::debug!(
        "Shot at {:.1} deg: {} hit(s), bad={}, hud '{}'",
        angle,
        report.hits.len(),
        report.hit_bad(),
        state.round.hud_text()
    );

    settle_round(state);
    true
}

/// Apply the round transition that follows a resolved shot
fn settle_round(state: &mut GameState) {
    match state.round.transition() {
        RoundTransition::Continue => {}
        RoundTransition::RoundWon => {
            let round = state.round.state().round;
            log::info!("Round {} cleared, score {}", round, state.round.state().score);
            state.push_event(GameEvent::RoundWon { round });
            state.round.next_round();
            generate_round(state);
        }
        RoundTransition::GameOver => {
            state.round.end_game();
            let s = state.round.state();
            let (score, round) = (s.score, s.round);
            log::info!("Game over in round {} with score {}", round, score);
            state.push_event(GameEvent::GameOver { score, round });
        }
    }
}

/// Roll a new population for the current round and put it on the track
pub fn generate_round(state: &mut GameState) {
    let population = state.generator.generate(&mut state.rng);
    state.install_population(population);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT_MS;
    use crate::options::GameOptions;
    use crate::sim::test_support::{aim_at, population_at};

    /// Spin the turret (without firing) until it points at `angle`
    fn aim(state: &mut GameState, angle: f32) {
        let idle = TickInput::default();
        let delta = crate::normalize_degrees(angle - state.turret.angle());
        let to_wrap = 360.0 - state.turret.angle();
        if delta >= to_wrap {
            // Cross the rotation boundary first; friction changes the speed there
            tick(state, &idle, to_wrap / state.turret.angular_speed() + 1e-3);
        }
        let delta = crate::normalize_degrees(angle - state.turret.angle());
        tick(state, &idle, delta / state.turret.angular_speed());
    }

    fn aim_at_target(state: &mut GameState, index: usize) {
        let p = state.targets[index].point(&state.path).position;
        let angle = aim_at(state.board_center(), p);
        aim(state, angle);
    }

    fn fire_input() -> TickInput {
        TickInput { fire: true }
    }

    /// Four targets, index 2 bad: one per side of the track
    fn scenario_state() -> GameState {
        GameState::with_population(
            GameOptions::default(),
            1,
            population_at(&[0.05, 0.3, 0.55, 0.8], &[2]),
        )
        .unwrap()
    }

    #[test]
    fn test_idle_tick_only_moves() {
        let mut state = scenario_state();
        let before = state.targets[0].path_fraction;
        tick(&mut state, &TickInput::default(), SIM_DT_MS);
        assert_eq!(state.time_ticks, 1);
        assert!(state.turret.angle() > 0.0);
        assert!(state.targets[0].path_fraction >= before);
        assert!(!state.fire_line.visible);
    }

    #[test]
    fn test_scripted_round_good_then_bad() {
        let mut state = scenario_state();
        assert_eq!(state.round_state().good_targets_left, 3);

        aim_at_target(&mut state, 0);
        assert!(fire(&mut state));
        assert_eq!(state.round_state().score, 1);
        assert_eq!(state.round_state().multiplier, 2);
        assert_eq!(state.round_state().ammo_left, 5);
        assert!(!state.targets[0].visible);

        // Wait out the fire line, then shoot the bad target
        tick(&mut state, &TickInput::default(), 80.0);
        aim_at_target(&mut state, 2);
        assert!(fire(&mut state));
        assert_eq!(state.round_state().ammo_left, 0);
        assert!(state.is_game_over());

        tick(&mut state, &TickInput::default(), 80.0);
        assert!(!fire(&mut state));
        assert_eq!(state.round_state().score, 1);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::TargetHit { id: 3, bad: true }));
        assert!(matches!(events.last(), Some(GameEvent::GameOver { score: 1, round: 1 })));
    }

    #[test]
    fn test_fire_line_blocks_second_shot() {
        let mut state = scenario_state();
        aim(&mut state, 200.0);
        assert!(fire(&mut state));
        assert_eq!(state.round_state().ammo_left, 5);

        // 50 ms later the line is still showing: trigger dropped
        tick(&mut state, &fire_input(), 50.0);
        assert_eq!(state.round_state().ammo_left, 5);
        assert!(state.fire_line.visible);

        // Past 75 ms the line clears before the trigger is evaluated
        tick(&mut state, &fire_input(), 30.0);
        assert_eq!(state.round_state().ammo_left, 4);
    }

    #[test]
    fn test_shot_applies_thrust() {
        let mut state = scenario_state();
        assert!(fire(&mut state));
        assert_eq!(state.turret.time_scale(), 2.0);
        assert_eq!(state.fire_line.angle, 0.0);
    }

    #[test]
    fn test_miss_resets_multiplier() {
        let mut state = scenario_state();
        aim_at_target(&mut state, 0);
        fire(&mut state);
        assert_eq!(state.round_state().multiplier, 2);

        tick(&mut state, &TickInput::default(), 80.0);
        // Straight at the already-hidden target: nothing else on that ray
        aim_at_target(&mut state, 0);
        fire(&mut state);
        assert_eq!(state.round_state().multiplier, 1);
        assert_eq!(state.round_state().score, 1);
        assert_eq!(state.drain_events().last(), Some(&GameEvent::ShotMissed));
    }

    #[test]
    fn test_last_bullet_clearing_round_starts_next_round() {
        let mut state = GameState::with_population(
            GameOptions {
                max_ammo: 1,
                ..Default::default()
            },
            7,
            population_at(&[0.05], &[]),
        )
        .unwrap();

        aim_at_target(&mut state, 0);
        assert!(fire(&mut state));
        assert!(!state.is_game_over());
        assert_eq!(state.round_state().round, 2);
        assert_eq!(state.round_state().ammo_left, 1);
        assert_eq!(state.round_state().score, 1);

        let good = state.targets.iter().filter(|t| !t.is_bad).count() as u32;
        assert_eq!(state.round_state().good_targets_left, good);
        assert!(state.targets.iter().all(|t| t.visible && t.id > 1));

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::RoundWon { round: 1 }));
        assert!(matches!(events.last(), Some(GameEvent::RoundStarted { round: 2, .. })));
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(GameOptions::default(), 4242).unwrap();
        let mut b = GameState::new(GameOptions::default(), 4242).unwrap();

        for i in 0..600 {
            let input = TickInput { fire: i % 37 == 0 };
            tick(&mut a, &input, SIM_DT_MS);
            tick(&mut b, &input, SIM_DT_MS);
        }

        assert_eq!(a.round_state(), b.round_state());
        assert_eq!(a.targets, b.targets);
        assert_eq!(a.turret, b.turret);
    }
}
