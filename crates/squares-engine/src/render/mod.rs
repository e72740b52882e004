//! Square rendering.
//!
//! [`draw_frame`] and [`draw_square`] are written once against the [`Canvas`]
//! seam; each backend supplies the canvas:
//! - [`gles`]: GLES2 program driven through `glow`, presented by an EGL surface
//! - [`instanced`]: instanced wgpu pipeline for the toolkit-hosted window
//! - `soft` (tests only): CPU reference rasterizer with the same coverage rules
//!
//! Convention: geometry is in GL clip space (+Y up); the projection uniform is
//! identity and applied as a row vector, exactly as the GLES shader does.

mod canvas;
mod shader;

pub mod gles;
pub mod instanced;

#[cfg(test)]
mod soft;

pub use canvas::{draw_frame, draw_square, Canvas, SwapTarget, CLEAR_COLOR};
pub use shader::{ShaderError, ShaderSources, ShaderStage};
