//! Per-round target population generation
//!
//! Decides how many targets a round has, which of them are bad, and where on
//! the track each one starts.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MIN_TARGETS, POSITION_JITTER};
use crate::options::{ConfigError, GameOptions};
use crate::wrap_fraction;

/// Source of the random draws used by generation.
///
/// Implemented for every [`Rng`]; tests script exact draws with their own
/// implementation.
pub trait Roller {
    /// Uniform draw in [0, 1)
    fn unit(&mut self) -> f64;
    /// Uniform index in [0, len); `len` must be non-zero
    fn index(&mut self, len: usize) -> usize;
    /// Uniform real in [min, max]
    fn between(&mut self, min: f32, max: f32) -> f32;
}

impl<R: Rng + ?Sized> Roller for R {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }

    fn between(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            min
        } else {
            self.random_range(min..=max)
        }
    }
}

/// Target counts ordered from most to least likely.
///
/// Takes `[2, max_targets]` ascending and repeatedly moves its middle element
/// (index `len / 2`) to the output, so the order starts mid-range and fans
/// outward: `max_targets = 6` gives `[4, 5, 3, 6, 2]`.
pub fn target_count_weights(max_targets: u32) -> Vec<u32> {
    let mut candidates: Vec<u32> = (MIN_TARGETS..=max_targets).collect();
    let mut weights = Vec::with_capacity(candidates.len());
    while !candidates.is_empty() {
        weights.push(candidates.remove(candidates.len() / 2));
    }
    weights
}

/// Index chosen by a front-biased pick for draw `u` in [0, 1)
#[inline]
pub fn weighted_index(u: f64, len: usize) -> usize {
    debug_assert!(len > 0);
    let index = (u * u * len as f64).floor() as usize;
    index.min(len - 1)
}

/// Pick from `items`, favouring earlier entries (squared-uniform index)
pub fn weighted_pick<T: Copy>(items: &[T], rolls: &mut impl Roller) -> T {
    assert!(!items.is_empty(), "weighted pick over an empty list");
    items[weighted_index(rolls.unit(), items.len())]
}

/// How many bad targets a population of `target_count` may get, front-biased
pub fn bad_count_weights(target_count: u32) -> [u32; 2] {
    if target_count > 4 { [1, 2] } else { [0, 1] }
}

/// `count` distinct indices drawn uniformly from `[0, target_count)`
pub fn pick_bad_indices(target_count: u32, count: u32, rolls: &mut impl Roller) -> Vec<u32> {
    assert!(
        count <= target_count,
        "cannot mark {count} of {target_count} targets bad"
    );
    let mut pool: Vec<u32> = (0..target_count).collect();
    (0..count)
        .map(|_| pool.remove(rolls.index(pool.len())))
        .collect()
}

/// Starting state of one target, before it is given an id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub is_bad: bool,
    pub size: f32,
    pub path_fraction: f32,
    pub duration_ms: f32,
}

/// The outcome of generating one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    pub targets: Vec<TargetSpec>,
    /// Indices into `targets` marked bad, in draw order
    pub bad_indices: Vec<u32>,
}

impl Population {
    pub fn target_count(&self) -> u32 {
        self.targets.len() as u32
    }

    pub fn good_count(&self) -> u32 {
        self.targets.iter().filter(|t| !t.is_bad).count() as u32
    }

    /// Check that `bad_indices` names distinct, in-range targets and exactly
    /// the ones flagged bad
    pub fn check(&self) -> Result<(), ConfigError> {
        let count = self.target_count();
        let mut seen = vec![false; self.targets.len()];
        for &i in &self.bad_indices {
            if i >= count {
                return Err(ConfigError::Invalid(format!(
                    "bad index {i} out of range for {count} targets"
                )));
            }
            if std::mem::replace(&mut seen[i as usize], true) {
                return Err(ConfigError::Invalid(format!("bad index {i} listed twice")));
            }
        }
        for (i, target) in self.targets.iter().enumerate() {
            if target.is_bad != seen[i] {
                return Err(ConfigError::Invalid(format!(
                    "target {i} bad flag disagrees with bad indices {:?}",
                    self.bad_indices
                )));
            }
        }
        Ok(())
    }
}

/// Generates target populations for a fixed set of options
#[derive(Debug, Clone)]
pub struct PopulationGenerator {
    count_weights: Vec<u32>,
    size_min: f32,
    size_max: f32,
    duration_ms: f32,
}

impl PopulationGenerator {
    /// `options` must already be validated
    pub fn new(options: &GameOptions) -> Self {
        let count_weights = target_count_weights(options.max_targets);
        log::debug!("Target count weights: {:?}", count_weights);
        Self {
            count_weights,
            size_min: options.target_size.min,
            size_max: options.target_size.max,
            duration_ms: options.target_speed.default,
        }
    }

    /// Roll a fresh population
    pub fn generate(&self, rolls: &mut impl Roller) -> Population {
        let target_count = weighted_pick(&self.count_weights, rolls);
        let bad_count = weighted_pick(&bad_count_weights(target_count), rolls);
        let bad_indices = pick_bad_indices(target_count, bad_count, rolls);
        self.layout(target_count, bad_indices, rolls)
    }

    /// Spread `target_count` targets around the track with jittered phases
    pub fn layout(
        &self,
        target_count: u32,
        bad_indices: Vec<u32>,
        rolls: &mut impl Roller,
    ) -> Population {
        let targets = (0..target_count)
            .map(|i| {
                let jitter = rolls.between(-POSITION_JITTER, POSITION_JITTER);
                let size = rolls.between(self.size_min, self.size_max);
                TargetSpec {
                    is_bad: bad_indices.contains(&i),
                    size,
                    path_fraction: wrap_fraction(i as f32 / target_count as f32 + jitter),
                    duration_ms: self.duration_ms,
                }
            })
            .collect();

        Population {
            targets,
            bad_indices,
        }
    }
}
