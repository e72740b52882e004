//! Instanced wgpu path used by the toolkit-hosted window.
//!
//! One pipeline, one static quad, one instance per square. The instance
//! carries the model matrix columns and the color, so a whole frame is a
//! single indexed draw.

mod canvas;
mod pass;
mod square;

pub use canvas::WgpuCanvas;
pub use pass::SquarePass;
pub use square::{SquareInstance, SquareRenderer};
