//! Game events (messages).

use bevy::prelude::*;

/// Message triggered when a run ends.
#[derive(Message)]
pub struct GameOverEvent {
    pub score: u32,
    pub best: u32,
}

/// Message triggered when the player asks for a new run.
#[derive(Message)]
pub struct RestartEvent;
