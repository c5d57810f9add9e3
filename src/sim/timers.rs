//! Delayed tasks
//!
//! Tasks are plain descriptors: the tick loop asks for the ones that are due
//! and applies them to the game state itself.

use serde::{Deserialize, Serialize};

/// Something to do once its delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledTask {
    /// Hide the fire line, allowing the next shot
    ClearFireLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Pending {
    due_ms: f64,
    /// Insertion order, keeps same-time tasks stable
    seq: u64,
    task: ScheduledTask,
}

/// Single-shot timers on the simulation clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    now_ms: f64,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulation time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Run `task` after `delay_ms`
    pub fn schedule(&mut self, delay_ms: f32, task: ScheduledTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms: self.now_ms + delay_ms.max(0.0) as f64,
            seq,
            task,
        });
    }

    /// Advance the clock and return the tasks that became due, earliest first
    pub fn advance(&mut self, dt_ms: f32) -> Vec<ScheduledTask> {
        self.now_ms += dt_ms.max(0.0) as f64;
        let now = self.now_ms;

        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|p| p.task).collect()
    }

    pub fn is_pending(&self, task: ScheduledTask) -> bool {
        self.pending.iter().any(|p| p.task == task)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
