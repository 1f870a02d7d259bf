//! ECS components for the flappy bird game.

use bevy::prelude::*;

/// Which half of a barrier pair an entity draws.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BarrierPart {
    Top,
    Bottom,
}

/// Component to mark the bird sprite.
#[derive(Component)]
pub struct BirdSprite;

/// Component linking a rendered rectangle to a model barrier.
#[derive(Component, Clone, Copy, Debug)]
pub struct BarrierVisual {
    pub id: u64,
    pub part: BarrierPart,
}

/// Component to mark the live score panel (removed on game over).
#[derive(Component)]
pub struct ScorePanel;

/// Component to mark the current score text inside the panel.
#[derive(Component)]
pub struct CurrentScoreText;

/// Component to mark the best score text inside the panel.
#[derive(Component)]
pub struct BestScoreText;

/// Component to mark the game over overlay UI.
#[derive(Component)]
pub struct GameOverUI;

/// Component to mark the restart button.
#[derive(Component)]
pub struct RestartButton;
