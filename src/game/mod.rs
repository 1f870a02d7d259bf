//! Shared game definitions: constants, marker components, messages, and resources.

mod components;
mod constants;
mod events;
mod resources;
mod sets;

pub use components::*;
pub use constants::*;
pub use events::*;
pub use resources::*;
pub use sets::*;
