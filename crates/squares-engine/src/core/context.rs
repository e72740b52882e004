use std::time::Instant;

use crate::input::InputState;
use crate::time::{FrameClock, FrameStats};

use super::signal;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Interrupts {
    /// Drain the process-wide SIGINT flag.
    Process,
    /// Ignore it; used when several contexts share a process.
    Detached,
}

/// Mutable application state handed to every event handler.
///
/// Holds the run flag, the pointer position and the frame counters. The only
/// state outside of it is the signal flag, drained by
/// [`AppContext::poll_interrupt`].
#[derive(Debug)]
pub struct AppContext {
    running: bool,
    input: InputState,
    clock: FrameClock,
    stats: FrameStats,
    interrupts: Interrupts,
}

impl AppContext {
    /// Context wired to the process SIGINT flag.
    pub fn new() -> Self {
        Self::with_interrupts(Interrupts::Process)
    }

    /// Context that never sees SIGINT.
    pub fn detached() -> Self {
        Self::with_interrupts(Interrupts::Detached)
    }

    fn with_interrupts(interrupts: Interrupts) -> Self {
        let now = Instant::now();
        Self {
            running: true,
            input: InputState::default(),
            clock: FrameClock::default(),
            stats: FrameStats::new(now),
            interrupts,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clears the run flag. There is no way to set it again.
    pub fn request_exit(&mut self) {
        if self.running {
            log::debug!("exit requested");
        }
        self.running = false;
    }

    /// Drains a pending interrupt into the run flag and returns the flag.
    pub fn poll_interrupt(&mut self) -> bool {
        if self.interrupts == Interrupts::Process && signal::take_interrupt() {
            log::info!("interrupted");
            self.request_exit();
        }
        self.running
    }

    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[inline]
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Frames presented so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// Records a presented frame.
    pub fn end_frame(&mut self) {
        let ft = self.clock.tick();
        self.stats.record(ft.now);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
