//! Toplevel shell surface lifecycle.
//!
//! Protocol-free: the Wayland client merges `xdg_toplevel.configure` (size
//! and states) with the following `xdg_surface.configure` (serial) into one
//! [`Configure`] and feeds it to [`ShellSurface`].

mod keepalive;
mod state;

pub use keepalive::KeepAlive;
pub use state::{Configure, ConfigureOutcome, ShellState, ShellSurface};
