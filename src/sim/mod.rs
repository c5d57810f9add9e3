//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (target creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod fire;
pub mod path;
pub mod population;
pub mod round;
pub mod state;
pub mod target;
pub mod tick;
pub mod timers;
pub mod turret;

#[cfg(test)]
pub(crate) mod test_support;

pub use collision::{Aabb, Segment, segment_intersects_aabb};
pub use fire::{FireLine, Hit, ShotReport};
pub use path::{PathPoint, PathSegment, TrackPath};
pub use population::{Population, PopulationGenerator, Roller, TargetSpec};
pub use round::{RoundState, RoundStateMachine, RoundTransition};
pub use state::{GameEvent, GameState};
pub use target::Target;
pub use tick::{TickInput, fire, generate_round, tick};
pub use timers::{ScheduledTask, Timers};
pub use turret::Turret;
