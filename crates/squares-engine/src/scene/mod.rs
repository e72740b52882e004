//! Scene description shared by every renderer.
//!
//! Responsibilities:
//! - the unit quad geometry and the fixed four-square layout
//! - per-draw model transforms (plain values, no shared matrix state)

mod cmd;
mod layout;
mod transform;

pub use cmd::SquareCmd;
pub use layout::{FOUR_SQUARES, QUAD_INDICES, QUAD_VERTICES};
pub use transform::Transform;
