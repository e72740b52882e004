use crate::core::ShellObserver;

/// Answers every shell ping with the same serial.
#[derive(Debug, Default)]
pub struct KeepAlive {
    pings: u64,
}

impl KeepAlive {
    /// Pings answered so far.
    pub fn pings(&self) -> u64 {
        self.pings
    }
}

impl ShellObserver for KeepAlive {
    fn ping(&mut self, serial: u32) -> u32 {
        self.pings += 1;
        log::trace!("ping {serial}");
        serial
    }
}
