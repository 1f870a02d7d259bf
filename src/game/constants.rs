//! Game constants for field size, speeds, timing, colors, and rendering layers.

use bevy::prelude::*;
use std::time::Duration;

// Field dimensions
pub const GRID_SIZE: u32 = 16;
pub const SQUARE_SIZE: f32 = 20.0;
pub const FIELD_WIDTH: f32 = 2.0 * GRID_SIZE as f32 * SQUARE_SIZE;
pub const FIELD_HEIGHT: f32 = GRID_SIZE as f32 * SQUARE_SIZE;

// Bird geometry (top-left anchored, field pixels)
pub const BIRD_SIZE: f32 = SQUARE_SIZE * 1.5;
pub const BIRD_X: f32 = (FIELD_WIDTH as u32 / 3) as f32;
pub const BIRD_START_Y: f32 = (FIELD_HEIGHT as u32 / 2) as f32;

// Speeds
pub const INITIAL_BARRIER_SPEED: f32 = 1.0;
pub const INITIAL_BIRD_SPEED: f32 = 1.3;
pub const FLAP_MULTIPLIER: f32 = 20.0;

// Barrier layout, in grid cells
pub const GATE_CELLS: u32 = 4;
pub const INITIAL_BARRIER_COLUMN: u32 = 30;
pub const BARRIER_STEP: u32 = 10;
pub const INITIAL_BARRIER_COUNT: usize = 10;
pub const REFILL_BARRIER_COLUMN: u32 = 40;

// Timing
pub const COLLISION_PERIOD: Duration = Duration::from_millis(5);
pub const BIRD_FALL_PERIOD: Duration = Duration::from_millis(10);
pub const SCROLL_PERIOD: Duration = Duration::from_millis(12);

// Persistence
pub const DEFAULT_SAVE_PATH: &str = "save";
pub const SAVE_PATH_ENV: &str = "FLAPPY_SAVE_PATH";

// Assets
pub const BIRD_IMAGE: &str = "images/bird.png";
pub const TROPHY_IMAGE: &str = "images/trophy.png";
pub const STAR_IMAGE: &str = "images/star.png";

// Colors
pub const BACKGROUND_COLOR: Color = Color::WHITE;
pub const BARRIER_COLOR: Color = Color::srgb(0.075, 0.318, 0.075);
pub const FIELD_BORDER_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.15);
pub const HUD_TEXT_COLOR: Color = Color::BLACK;
pub const RESTART_BUTTON_COLOR: Color = Color::srgb(0.85, 0.1, 0.1);
pub const RESTART_BUTTON_HOVER_COLOR: Color = Color::srgb(0.95, 0.25, 0.25);

// Z-index constants for rendering layers
pub const Z_BARRIER: f32 = 1.0;
pub const Z_BIRD: f32 = 2.0;
pub const Z_BORDER: f32 = 3.0;
