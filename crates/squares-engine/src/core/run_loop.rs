use anyhow::Result;

use super::AppContext;

/// Source of queued platform events that owns the [`AppContext`] its
/// handlers write to.
pub trait EventPump {
    /// Delivers whatever is queued without blocking on an empty queue.
    fn pump(&mut self) -> Result<()>;

    fn app(&mut self) -> &mut AppContext;
}

/// Cooperative main loop: pump, then draw, until the run flag clears.
///
/// The flag (with any pending interrupt) is checked before the pump and
/// again before drawing, so nothing is drawn once a close or interrupt has
/// been seen. Returns the number of frames drawn.
pub fn run<P, F>(pump: &mut P, mut frame: F) -> Result<u64>
where
    P: EventPump + ?Sized,
    F: FnMut(&mut P) -> Result<()>,
{
    while pump.app().poll_interrupt() {
        pump.pump()?;

        if !pump.app().poll_interrupt() {
            break;
        }

        frame(pump)?;
        pump.app().end_frame();
    }

    Ok(pump.app().frames())
}
