//! Input subsystem.
//!
//! Platform code (the Wayland pointer dispatch or the winit runtime)
//! translates native events into [`PointerEvent`]s; the rest of the crate
//! never sees protocol or toolkit types.

mod router;
mod state;
mod types;

pub mod platform;

pub use router::{ClickRouter, Quadrant, QUADRANT_SPLIT};
pub use state::InputState;
pub use types::{Axis, ButtonState, MouseButton, PointerEvent};
