use winit::window::Window;

use crate::device::Gpu;
use crate::render::instanced::{SquareRenderer, WgpuCanvas};

use super::AppContext;

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub app: &'a mut AppContext,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Canvas presenting to this window through `renderer`.
    pub fn canvas<'s>(&'s mut self, renderer: &'s mut SquareRenderer) -> WgpuCanvas<'s, 'w> {
        self.window.pre_present_notify();
        WgpuCanvas::new(self.gpu, renderer)
    }
}
