//! Squares engine crate.
//!
//! Shared pieces for the two squares demos: the four-square scene and its
//! renderers, EGL and wgpu device layers, the shell surface state machine,
//! pointer routing and the cooperative main loop.

pub mod config;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod shell;
pub mod time;
pub mod window;
