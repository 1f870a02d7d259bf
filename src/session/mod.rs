//! Session plugin - owns all mutable game state and drives start, restart, and game over.

mod tasks;

pub use tasks::SessionTasks;

use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

use crate::barrier::{BarrierQueues, ScrollLane, generate};
use crate::bird::Bird;
use crate::collision::{TickOutcome, evaluate};
use crate::game::{
    BARRIER_STEP, GameOverEvent, GameSet, INITIAL_BARRIER_COLUMN, INITIAL_BARRIER_COUNT,
    INITIAL_BARRIER_SPEED, RestartEvent,
};
use crate::persistence::HighScore;

/// Plugin for session flow systems.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GameSet::Input,
                GameSet::Flow,
                GameSet::Motion,
                GameSet::Collision,
                GameSet::Presentation,
            )
                .chain(),
        )
        .add_message::<GameOverEvent>()
        .add_message::<RestartEvent>()
        .add_systems(Startup, setup_session)
        .add_systems(
            Update,
            (start_first_run, restart_session)
                .chain()
                .in_set(GameSet::Flow),
        );
    }
}

/// Session phase enum to track which state the game is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    SettingUp,
    Running,
    GameOver,
}

/// Current run score and the best score seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub current: u32,
    pub best: u32,
}

impl Score {
    pub fn with_best(best: u32) -> Self {
        Score { current: 0, best }
    }

    /// Counts one cleared barrier and raises the best score if beaten.
    pub fn record_pass(&mut self) {
        self.current += 1;
        self.best = self.best.max(self.current);
    }
}

/// Summary shown when a run ends.
pub fn result_text(score: u32, best: u32) -> String {
    format!("Total score: {} | Best score: {}", score, best)
}

/// Main game state resource.
#[derive(Resource, Debug)]
pub struct Session {
    phase: SessionPhase,
    pub bird: Bird,
    pub barriers: BarrierQueues,
    pub score: Score,
    barrier_speed: f32,
    tasks: SessionTasks,
}

impl Session {
    pub fn new(best: u32) -> Self {
        Session {
            phase: SessionPhase::SettingUp,
            bird: Bird::default(),
            barriers: BarrierQueues::default(),
            score: Score::with_best(best),
            barrier_speed: INITIAL_BARRIER_SPEED,
            tasks: SessionTasks::halted(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn barrier_speed(&self) -> f32 {
        self.barrier_speed
    }

    #[cfg(test)]
    pub fn tasks(&self) -> &SessionTasks {
        &self.tasks
    }

    /// Resets every piece of run state and launches fresh periodic tasks.
    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        self.barriers.clear();
        self.barriers.extend_ahead(generate(
            INITIAL_BARRIER_COLUMN as f32,
            BARRIER_STEP,
            INITIAL_BARRIER_COUNT,
            rng,
        ));
        self.bird = Bird::default();
        self.score.current = 0;
        self.barrier_speed = INITIAL_BARRIER_SPEED;
        self.tasks = SessionTasks::fresh();
        self.phase = SessionPhase::Running;
    }

    /// Starts a new run after a game over. Ignored in any other phase.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.phase != SessionPhase::GameOver {
            return false;
        }
        self.start(rng);
        true
    }

    /// Freezes the scene: both speeds drop to zero and every task halts.
    pub fn game_over(&mut self) {
        self.barrier_speed = 0.0;
        self.bird.speed = 0.0;
        self.tasks.halt_all();
        self.phase = SessionPhase::GameOver;
    }

    pub fn result_text(&self) -> String {
        result_text(self.score.current, self.score.best)
    }

    /// Applies a flap while running. Returns whether the bird moved.
    pub fn flap(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.bird.flap();
        true
    }

    /// Runs the fall task for `delta`. Returns the number of ticks applied.
    pub fn advance_bird(&mut self, delta: Duration) -> u32 {
        let ticks = self.tasks.bird_fall.advance(delta);
        for _ in 0..ticks {
            self.bird.fall();
        }
        ticks
    }

    /// Runs one scroll lane's task for `delta`.
    pub fn advance_scroll(&mut self, lane: ScrollLane, delta: Duration) -> u32 {
        let ticks = self.tasks.scroll_mut(lane).advance(delta);
        for _ in 0..ticks {
            self.barriers.scroll(lane, self.barrier_speed);
        }
        ticks
    }

    /// Runs the collision task for `delta`, stopping at the first crash.
    /// Returns the crash outcome when this call ended the run.
    pub fn advance_collision<R: Rng>(
        &mut self,
        delta: Duration,
        rng: &mut R,
    ) -> Option<TickOutcome> {
        let ticks = self.tasks.collision.advance(delta);
        for _ in 0..ticks {
            let outcome = self.collision_tick(rng);
            if outcome.is_crash() {
                return Some(outcome);
            }
        }
        None
    }

    /// One collision and scoring step against the nearest ahead barrier.
    pub fn collision_tick<R: Rng>(&mut self, rng: &mut R) -> TickOutcome {
        if self.phase != SessionPhase::Running {
            return TickOutcome::Clear;
        }
        let outcome = evaluate(&self.bird.bounds(), self.barriers.front());
        match outcome {
            TickOutcome::OffField | TickOutcome::HitBarrier => self.game_over(),
            TickOutcome::Passed => {
                self.barriers.pass_front(rng);
                self.score.record_pass();
            }
            TickOutcome::InGate | TickOutcome::Clear => {}
        }
        outcome
    }
}

/// Startup system - builds the session around the persisted best score.
fn setup_session(mut commands: Commands, high_score: Res<HighScore>) {
    info!("Best score on record: {}", high_score.best());
    commands.insert_resource(Session::new(high_score.best()));
}

/// System to leave the setting-up phase on the first frame.
fn start_first_run(mut session: ResMut<Session>) {
    if session.phase() == SessionPhase::SettingUp {
        session.start(&mut rand::rng());
        info!("Run started");
    }
}

/// System to restart the game when requested from the game over screen.
fn restart_session(mut restart_reader: MessageReader<RestartEvent>, mut session: ResMut<Session>) {
    if restart_reader.read().last().is_some() && session.restart(&mut rand::rng()) {
        info!("Run restarted, best score: {}", session.score.best);
    }
}
