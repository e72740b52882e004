//! Core application contracts.
//!
//! - [`AppContext`]: run flag, pointer state and frame counters, handed to
//!   every handler
//! - observer traits that protocol dispatch forwards into
//! - the cooperative [`run`] loop and the SIGINT bridge feeding it
//! - the [`App`] contract for the winit runtime

mod app;
mod cli;
mod context;
mod ctx;
mod observer;
mod run_loop;
mod signal;

pub use app::{App, AppControl};
pub use cli::{usage, Invocation};
pub use context::AppContext;
pub use ctx::FrameCtx;
pub use observer::{PointerObserver, ShellObserver, SurfaceObserver};
pub use run_loop::{run, EventPump};
pub use signal::install_interrupt_handler;
