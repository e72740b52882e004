//! Frame timing.
//!
//! - one `FrameClock` per loop; `tick()` once per presented frame
//! - `FrameStats` turns ticks into a periodic frame-count report

mod frame_clock;
mod stats;

pub use frame_clock::{FrameClock, FrameTime};
pub use stats::{FrameReport, FrameStats, REPORT_INTERVAL};
