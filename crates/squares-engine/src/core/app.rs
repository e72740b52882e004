use anyhow::Result;

use crate::device::Gpu;
use crate::input::PointerEvent;

use super::ctx::FrameCtx;
use super::AppContext;

/// Control directive returned by frame callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application hosted by the winit runtime.
pub trait App {
    /// Called once the window and its GPU context exist. An error aborts the
    /// run and is returned from `Runtime::run`.
    fn on_init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let _ = gpu;
        Ok(())
    }

    /// Called for every translated pointer event.
    fn on_pointer(&mut self, ctx: &mut AppContext, event: PointerEvent) {
        let _ = (ctx, event);
    }

    /// Called once per redraw.
    fn on_frame(&mut self, frame: &mut FrameCtx<'_, '_>) -> Result<AppControl>;
}
