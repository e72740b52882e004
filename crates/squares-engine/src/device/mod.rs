//! Graphics device management.
//!
//! Two stacks live here:
//! - EGL: display, framebuffer config selection, context and window surface
//!   for the GLES2 path. Teardown order is carried by borrows:
//!   [`WindowSurface`] borrows [`GraphicsContext`], which borrows
//!   [`EglDisplay`].
//! - wgpu: Instance/Adapter/Device/Queue plus the configured surface for the
//!   toolkit-hosted window.

mod config;
mod context;
mod egl;
mod init;
mod surface;

pub use config::{choose_config, ConfigInfo, ConfigRequest, NoMatchingConfig};
pub use context::Gpu;
pub use egl::{EglDisplay, EglError, GraphicsContext, SwapStrategy, WindowSurface};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
