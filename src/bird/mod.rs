//! Bird plugin - handles the constant fall and the flap input.

use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;

use crate::barrier::Extents;
use crate::game::{BIRD_SIZE, BIRD_START_Y, BIRD_X, FLAP_MULTIPLIER, GameSet, INITIAL_BIRD_SPEED};
use crate::session::Session;

/// Plugin for bird-related systems.
pub struct BirdPlugin;

impl Plugin for BirdPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, bird_flap_input.in_set(GameSet::Input))
            .add_systems(Update, bird_fall.in_set(GameSet::Motion));
    }
}

/// The bird's vertical state. Its x position never changes.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bird {
    /// Top edge in field pixels.
    pub y: f32,
    /// Pixels fallen per tick; a flap rises `FLAP_MULTIPLIER` times this.
    pub speed: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Bird {
            y: BIRD_START_Y,
            speed: INITIAL_BIRD_SPEED,
        }
    }
}

impl Bird {
    pub fn bounds(&self) -> Extents {
        Extents {
            left: BIRD_X,
            top: self.y,
            right: BIRD_X + BIRD_SIZE,
            bottom: self.y + BIRD_SIZE,
        }
    }

    pub fn fall(&mut self) {
        self.y += self.speed;
    }

    pub fn flap(&mut self) {
        self.y -= FLAP_MULTIPLIER * self.speed;
    }
}

/// Space and A both flap.
pub fn is_flap_key(key: KeyCode) -> bool {
    matches!(key, KeyCode::Space | KeyCode::KeyA)
}

/// System to apply one flap per key-press event, including key repeats.
fn bird_flap_input(
    mut keyboard_events: MessageReader<KeyboardInput>,
    mut session: ResMut<Session>,
) {
    for event in keyboard_events.read() {
        if event.state == ButtonState::Pressed && is_flap_key(event.key_code) {
            session.flap();
        }
    }
}

/// System to run the bird's fall task.
fn bird_fall(time: Res<Time>, mut session: ResMut<Session>) {
    session.advance_bird(time.delta());
}
