//! Collision plugin - runs the collision and scoring loop that drives game over.

use bevy::prelude::*;

use crate::barrier::{Barrier, Extents};
use crate::game::{FIELD_HEIGHT, GameOverEvent, GameSet};
use crate::session::Session;

/// Plugin for the collision and scoring loop.
pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, collision_loop.in_set(GameSet::Collision));
    }
}

/// Result of one collision tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    /// Bird touched the top or bottom of the field.
    OffField,
    /// Bird hit the upper or lower rectangle of the front barrier.
    HitBarrier,
    /// Bird cleared the front barrier.
    Passed,
    /// Bird is inside the front barrier's gate.
    InGate,
    /// Nothing happened this tick.
    Clear,
}

impl TickOutcome {
    pub fn is_crash(self) -> bool {
        matches!(self, TickOutcome::OffField | TickOutcome::HitBarrier)
    }
}

/// Classifies the bird against the field bounds and the nearest barrier.
///
/// Rules are checked in a fixed order: leaving the field wins over passing
/// a barrier, and passing wins over entering the barrier's column.
pub fn evaluate(bird: &Extents, front: Option<&Barrier>) -> TickOutcome {
    if bird.top <= 0.0 || bird.bottom >= FIELD_HEIGHT {
        return TickOutcome::OffField;
    }
    let Some(barrier) = front else {
        return TickOutcome::Clear;
    };
    if bird.left >= barrier.top.right {
        TickOutcome::Passed
    } else if bird.right >= barrier.top.left {
        if bird.top <= barrier.top.bottom || bird.bottom >= barrier.bottom.top {
            TickOutcome::HitBarrier
        } else {
            TickOutcome::InGate
        }
    } else {
        TickOutcome::Clear
    }
}

/// System to run the collision task and announce the end of a run.
fn collision_loop(
    time: Res<Time>,
    mut session: ResMut<Session>,
    mut game_over_writer: MessageWriter<GameOverEvent>,
) {
    let mut rng = rand::rng();
    if let Some(outcome) = session.advance_collision(time.delta(), &mut rng) {
        info!(
            "Game over ({:?})! Final score: {}, best: {}",
            outcome, session.score.current, session.score.best
        );
        game_over_writer.write(GameOverEvent {
            score: session.score.current,
            best: session.score.best,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BIRD_SIZE, BIRD_X, SQUARE_SIZE};

    fn bird_at(left: f32, top: f32) -> Extents {
        Extents {
            left,
            top,
            right: left + BIRD_SIZE,
            bottom: top + BIRD_SIZE,
        }
    }

    /// Barrier whose gate spans rows 5..9, i.e. pixels 100..180.
    fn barrier_at_left(left: f32) -> Barrier {
        let mut barrier = Barrier::at_column(0.0, 5);
        for rect in [&mut barrier.top, &mut barrier.bottom] {
            rect.left += left;
            rect.right += left;
        }
        barrier
    }

    #[test]
    fn test_top_edge_is_off_field() {
        assert_eq!(evaluate(&bird_at(BIRD_X, 0.0), None), TickOutcome::OffField);
        assert_eq!(evaluate(&bird_at(BIRD_X, -4.0), None), TickOutcome::OffField);
    }

    #[test]
    fn test_bottom_edge_is_off_field() {
        let bird = bird_at(BIRD_X, FIELD_HEIGHT - BIRD_SIZE);
        assert_eq!(evaluate(&bird, None), TickOutcome::OffField);
    }

    #[test]
    fn test_off_field_beats_pass_through() {
        let barrier = barrier_at_left(BIRD_X - 100.0);
        let bird = bird_at(BIRD_X, 0.0);
        assert!(bird.left >= barrier.top.right);
        assert_eq!(evaluate(&bird, Some(&barrier)), TickOutcome::OffField);
    }

    #[test]
    fn test_pass_when_left_edge_reaches_barrier_right() {
        let barrier = barrier_at_left(BIRD_X - SQUARE_SIZE);
        assert_eq!(barrier.top.right, BIRD_X);
        // Height would hit the upper rectangle, but passing is checked first.
        let bird = bird_at(BIRD_X, 10.0);
        assert_eq!(evaluate(&bird, Some(&barrier)), TickOutcome::Passed);
    }

    #[test]
    fn test_inside_gate_is_safe() {
        let barrier = barrier_at_left(BIRD_X + 10.0);
        let bird = bird_at(BIRD_X, 120.0);
        assert_eq!(evaluate(&bird, Some(&barrier)), TickOutcome::InGate);
    }

    #[test]
    fn test_hits_upper_rectangle() {
        let barrier = barrier_at_left(BIRD_X + 10.0);
        let bird = bird_at(BIRD_X, 100.0);
        assert_eq!(evaluate(&bird, Some(&barrier)), TickOutcome::HitBarrier);
    }

    #[test]
    fn test_hits_lower_rectangle() {
        let barrier = barrier_at_left(BIRD_X + 10.0);
        let bird = bird_at(BIRD_X, 150.0);
        assert_eq!(evaluate(&bird, Some(&barrier)), TickOutcome::HitBarrier);
    }

    #[test]
    fn test_touching_left_edge_enters_column() {
        let barrier = barrier_at_left(BIRD_X + BIRD_SIZE);
        let bird = bird_at(BIRD_X, 20.0);
        assert_eq!(evaluate(&bird, Some(&barrier)), TickOutcome::HitBarrier);
    }

    #[test]
    fn test_clear_before_barrier() {
        let barrier = barrier_at_left(BIRD_X + BIRD_SIZE + 1.0);
        let bird = bird_at(BIRD_X, 20.0);
        assert_eq!(evaluate(&bird, Some(&barrier)), TickOutcome::Clear);
        assert!(!TickOutcome::Clear.is_crash());
        assert!(TickOutcome::HitBarrier.is_crash());
    }
}
