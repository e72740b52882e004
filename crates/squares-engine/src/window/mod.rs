//! Toolkit-hosted window loop.
//!
//! Owns the `winit` EventLoop and the single window, and wires them to the
//! wgpu device layer and an [`App`](crate::core::App).

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
