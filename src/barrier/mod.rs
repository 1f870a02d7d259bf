//! Barrier plugin - generates gated barrier pairs and scrolls them across the field.

use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;

use crate::game::{
    BARRIER_STEP, FIELD_HEIGHT, GATE_CELLS, GRID_SIZE, GameSet, REFILL_BARRIER_COLUMN, SQUARE_SIZE,
};
use crate::session::Session;

/// Plugin for barrier scrolling.
pub struct BarrierPlugin;

impl Plugin for BarrierPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, scroll_barriers.in_set(GameSet::Motion));
    }
}

/// Axis-aligned rectangle in field pixels (origin top-left, y grows downward).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Extents {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Extents {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    fn shift_left(&mut self, dx: f32) {
        self.left -= dx;
        self.right -= dx;
    }
}

/// A top and bottom rectangle that move together, with the gate between them.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Barrier {
    pub id: u64,
    pub gate_row: u32,
    pub top: Extents,
    pub bottom: Extents,
}

impl Barrier {
    /// Builds a one-cell wide barrier at `column` whose gate starts at `gate_row`.
    pub fn at_column(column: f32, gate_row: u32) -> Self {
        let left = column * SQUARE_SIZE;
        let right = (column + 1.0) * SQUARE_SIZE;
        Barrier {
            id: 0,
            gate_row,
            top: Extents {
                left,
                top: 0.0,
                right,
                bottom: gate_row as f32 * SQUARE_SIZE,
            },
            bottom: Extents {
                left,
                top: (gate_row + GATE_CELLS) as f32 * SQUARE_SIZE,
                right,
                bottom: FIELD_HEIGHT,
            },
        }
    }

    /// Gate height in grid cells.
    #[cfg(test)]
    pub fn gate_cells(&self) -> f32 {
        (self.bottom.top - self.top.bottom) / SQUARE_SIZE
    }
}

/// Produces `count` barriers at columns `x_start, x_start + step, ...`, each
/// with a gate row drawn uniformly from `[1, GRID_SIZE - GATE_CELLS]`.
pub fn generate<R: Rng>(
    x_start: f32,
    step: u32,
    count: usize,
    rng: &mut R,
) -> Vec<Barrier> {
    (0..count)
        .map(|i| {
            let gate_row = rng.random_range(1..=GRID_SIZE - GATE_CELLS);
            Barrier::at_column(x_start + (i as u32 * step) as f32, gate_row)
        })
        .collect()
}

/// The three independently scheduled scroll tasks.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScrollLane {
    AheadTop,
    AheadBottom,
    Behind,
}

impl ScrollLane {
    pub const ALL: [ScrollLane; 3] = [
        ScrollLane::AheadTop,
        ScrollLane::AheadBottom,
        ScrollLane::Behind,
    ];

    pub fn index(self) -> usize {
        match self {
            ScrollLane::AheadTop => 0,
            ScrollLane::AheadBottom => 1,
            ScrollLane::Behind => 2,
        }
    }
}

/// Barriers split by the bird's position: `ahead` still has to be cleared
/// (front is nearest), `behind` has been passed and is scrolling out.
#[derive(Debug, Default, Clone)]
pub struct BarrierQueues {
    ahead: VecDeque<Barrier>,
    behind: VecDeque<Barrier>,
    next_id: u64,
}

impl BarrierQueues {
    /// Drops every barrier. Ids keep counting so stale visuals never match.
    pub fn clear(&mut self) {
        self.ahead.clear();
        self.behind.clear();
    }

    /// Appends barriers to the ahead queue, assigning each a fresh id.
    pub fn extend_ahead(&mut self, barriers: impl IntoIterator<Item = Barrier>) {
        for mut barrier in barriers {
            self.next_id += 1;
            barrier.id = self.next_id;
            self.ahead.push_back(barrier);
        }
    }

    pub fn front(&self) -> Option<&Barrier> {
        self.ahead.front()
    }

    #[cfg(test)]
    pub fn ahead(&self) -> &VecDeque<Barrier> {
        &self.ahead
    }

    #[cfg(test)]
    pub fn behind(&self) -> &VecDeque<Barrier> {
        &self.behind
    }

    /// All barriers on the timeline, passed ones first.
    pub fn iter(&self) -> impl Iterator<Item = &Barrier> {
        self.behind.iter().chain(self.ahead.iter())
    }

    pub fn get(&self, id: u64) -> Option<&Barrier> {
        self.iter().find(|barrier| barrier.id == id)
    }

    /// Column for the next refill barrier: the fixed refill column, pushed
    /// one step past the last ahead barrier when that one is further out.
    ///
    /// A running game keeps ten barriers ahead, so its last one is always
    /// far past the refill column and every refill lands one step after it.
    /// The fixed column only wins when the last ahead barrier is at or
    /// before `REFILL_BARRIER_COLUMN - BARRIER_STEP`.
    pub fn refill_column(&self) -> f32 {
        let after_last = self
            .ahead
            .back()
            .map(|last| last.top.left / SQUARE_SIZE + BARRIER_STEP as f32)
            .unwrap_or(0.0);
        after_last.max(REFILL_BARRIER_COLUMN as f32)
    }

    /// Moves the front barrier behind the bird and appends exactly one new
    /// barrier. Returns false when there was nothing to pass.
    pub fn pass_front<R: Rng>(&mut self, rng: &mut R) -> bool {
        let Some(passed) = self.ahead.pop_front() else {
            return false;
        };
        self.behind.push_back(passed);
        let column = self.refill_column();
        self.extend_ahead(generate(column, BARRIER_STEP, 1, rng));
        true
    }

    /// Shifts every rectangle in `lane` left by `dx` pixels.
    pub fn scroll(&mut self, lane: ScrollLane, dx: f32) {
        match lane {
            ScrollLane::AheadTop => self.ahead.iter_mut().for_each(|b| b.top.shift_left(dx)),
            ScrollLane::AheadBottom => self.ahead.iter_mut().for_each(|b| b.bottom.shift_left(dx)),
            ScrollLane::Behind => {
                for barrier in self.behind.iter_mut() {
                    barrier.top.shift_left(dx);
                    barrier.bottom.shift_left(dx);
                }
                while self.behind.front().is_some_and(|b| b.top.right < 0.0) {
                    self.behind.pop_front();
                }
            }
        }
    }
}

/// System to run each scroll lane's periodic task.
fn scroll_barriers(time: Res<Time>, mut session: ResMut<Session>) {
    let delta = time.delta();
    for lane in ScrollLane::ALL {
        session.advance_scroll(lane, delta);
    }
}
