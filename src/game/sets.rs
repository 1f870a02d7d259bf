//! System set labels that fix the per-frame order of game systems.

use bevy::prelude::*;

/// Frame phases, chained in declaration order.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub enum GameSet {
    /// Keyboard and button handling.
    Input,
    /// Session start and restart.
    Flow,
    /// Bird fall and barrier scrolling.
    Motion,
    /// Collision and scoring loop.
    Collision,
    /// Persistence, sprite sync, and UI updates.
    Presentation,
}
