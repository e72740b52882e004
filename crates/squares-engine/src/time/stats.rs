use std::time::{Duration, Instant};

/// How often `FrameStats` reports.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Frames presented during one report window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    pub frames: u64,
    pub elapsed: Duration,
}

impl FrameReport {
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 { self.frames as f64 / secs } else { 0.0 }
    }
}

/// Counts presented frames and emits a report once per interval.
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: Duration,
    window_start: Instant,
    in_window: u64,
}

impl FrameStats {
    pub fn new(start: Instant) -> Self {
        Self::with_interval(start, REPORT_INTERVAL)
    }

    pub fn with_interval(start: Instant, interval: Duration) -> Self {
        Self {
            interval,
            window_start: start,
            in_window: 0,
        }
    }

    /// Records one frame at `now`. Returns a report when the interval has
    /// elapsed, and logs it at debug level.
    pub fn record(&mut self, now: Instant) -> Option<FrameReport> {
        self.in_window += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }

        let report = FrameReport {
            frames: self.in_window,
            elapsed,
        };
        log::debug!(
            "{} frames in {:.1} seconds = {:.3} FPS",
            report.frames,
            elapsed.as_secs_f64(),
            report.fps()
        );

        self.window_start = now;
        self.in_window = 0;
        Some(report)
    }
}
