//! Event observer seams.
//!
//! Protocol dispatch code decodes native events and forwards them here, so
//! the behavior behind each event can be driven directly in tests.

use crate::input::PointerEvent;
use crate::shell::{Configure, ConfigureOutcome};

use super::AppContext;

/// Shell liveness checks.
pub trait ShellObserver {
    /// Answers a ping; the returned serial goes back in the pong.
    fn ping(&mut self, serial: u32) -> u32;
}

/// Toplevel surface lifecycle.
pub trait SurfaceObserver {
    /// Applies a configure and says what to acknowledge and resize.
    fn configure(&mut self, ctx: &mut AppContext, configure: Configure) -> ConfigureOutcome;

    /// The compositor asked the surface to close.
    fn close(&mut self, ctx: &mut AppContext);
}

/// Pointer input.
pub trait PointerObserver {
    fn pointer(&mut self, ctx: &mut AppContext, event: PointerEvent);
}
