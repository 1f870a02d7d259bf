//! Periodic tasks driven by frame time, each with its own halt flag.

use bevy::prelude::*;
use std::time::Duration;

use crate::barrier::ScrollLane;
use crate::game::{BIRD_FALL_PERIOD, COLLISION_PERIOD, SCROLL_PERIOD};

/// A repeating task that fires once per elapsed period until halted.
///
/// Halting is permanent: a halted task never fires again, and a new run
/// replaces it with a fresh task.
#[derive(Debug, Clone)]
pub struct PeriodicTask {
    timer: Timer,
    active: bool,
}

impl PeriodicTask {
    pub fn new(period: Duration) -> Self {
        PeriodicTask {
            timer: Timer::new(period, TimerMode::Repeating),
            active: true,
        }
    }

    pub fn halt(&mut self) {
        self.active = false;
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advances the task by `delta` and returns how many ticks are due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if !self.active {
            return 0;
        }
        self.timer.tick(delta);
        self.timer.times_finished_this_tick()
    }
}

/// Every periodic task a running session owns.
#[derive(Debug, Clone)]
pub struct SessionTasks {
    scroll: [PeriodicTask; 3],
    pub bird_fall: PeriodicTask,
    pub collision: PeriodicTask,
}

impl SessionTasks {
    pub fn fresh() -> Self {
        SessionTasks {
            scroll: std::array::from_fn(|_| PeriodicTask::new(SCROLL_PERIOD)),
            bird_fall: PeriodicTask::new(BIRD_FALL_PERIOD),
            collision: PeriodicTask::new(COLLISION_PERIOD),
        }
    }

    pub fn halted() -> Self {
        let mut tasks = Self::fresh();
        tasks.halt_all();
        tasks
    }

    pub fn halt_all(&mut self) {
        self.scroll.iter_mut().for_each(PeriodicTask::halt);
        self.bird_fall.halt();
        self.collision.halt();
    }

    pub fn scroll_mut(&mut self, lane: ScrollLane) -> &mut PeriodicTask {
        &mut self.scroll[lane.index()]
    }

    #[cfg(test)]
    pub fn any_active(&self) -> bool {
        self.scroll.iter().any(PeriodicTask::is_active)
            || self.bird_fall.is_active()
            || self.collision.is_active()
    }
}
