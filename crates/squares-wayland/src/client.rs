//! Dispatch state for the squares client.
//!
//! Every `Dispatch` impl here only decodes; behavior lives behind the
//! engine's observer traits so it can be exercised without a compositor.

use squares_engine::config::SquaresConfig;
use squares_engine::coords::Geometry;
use squares_engine::core::{AppContext, PointerObserver, ShellObserver, SurfaceObserver};
use squares_engine::input::ClickRouter;
use squares_engine::shell::{Configure, KeepAlive, ShellState, ShellSurface};
use wayland_client::protocol::{wl_compositor, wl_pointer, wl_registry, wl_seat, wl_surface};
use wayland_client::{Connection, Dispatch, Proxy, QueueHandle, WEnum};
use wayland_protocols::xdg::shell::client::{xdg_surface, xdg_toplevel, xdg_wm_base};

use crate::globals::Globals;
use crate::pointer;

/// `xdg_toplevel.state` value for fullscreen.
const STATE_FULLSCREEN: u32 = 2;

/// Toplevel half of a configure sequence, held until the matching
/// `xdg_surface.configure` supplies the serial.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct PendingToplevel {
    width: i32,
    height: i32,
    fullscreen: bool,
}

pub struct Client {
    pub ctx: AppContext,
    pub globals: Globals,
    keepalive: KeepAlive,
    shell: ShellSurface,
    router: ClickRouter,
    pointer: Option<wl_pointer::WlPointer>,
    pending: Option<PendingToplevel>,
    resize: Option<Geometry>,
}

impl Client {
    pub fn new(ctx: AppContext, config: &SquaresConfig) -> Self {
        Self {
            ctx,
            globals: Globals::default(),
            keepalive: KeepAlive::default(),
            shell: ShellSurface::new(config.initial_size),
            router: ClickRouter::stdout(),
            pointer: None,
            pending: None,
            resize: None,
        }
    }

    /// Size the backing store should take before the next frame, if it
    /// changed since the last call.
    pub fn take_resize(&mut self) -> Option<Geometry> {
        self.resize.take()
    }

    /// True until the first configure has been applied.
    pub fn awaiting_configure(&self) -> bool {
        self.shell.state() == ShellState::Unconfigured
    }

    fn configure(&mut self, serial: u32) -> u32 {
        let fullscreen = self.shell.state() == ShellState::Fullscreen;
        let pending = self.pending.take().unwrap_or(PendingToplevel {
            width: 0,
            height: 0,
            fullscreen,
        });

        let outcome = self.shell.configure(
            &mut self.ctx,
            Configure {
                width: pending.width,
                height: pending.height,
                fullscreen: pending.fullscreen,
                serial,
            },
        );
        if let Some(size) = outcome.resize {
            self.resize = Some(size);
        }
        outcome.ack_serial
    }

    fn seat_capabilities(
        &mut self,
        seat: &wl_seat::WlSeat,
        caps: wl_seat::Capability,
        qh: &QueueHandle<Self>,
    ) {
        let has_pointer = caps.contains(wl_seat::Capability::Pointer);

        match (has_pointer, self.pointer.take()) {
            (true, None) => {
                log::debug!("seat gained a pointer");
                self.pointer = Some(seat.get_pointer(qh, ()));
            }
            (false, Some(pointer)) => {
                log::debug!("seat lost its pointer");
                if pointer.version() >= 3 {
                    pointer.release();
                }
            }
            (_, kept) => self.pointer = kept,
        }
    }
}

/// Whether a `xdg_toplevel.configure` state array holds the fullscreen state.
/// The array is a packed list of native-endian `u32`s.
fn states_fullscreen(states: &[u8]) -> bool {
    states
        .chunks_exact(4)
        .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .any(|s| s == STATE_FULLSCREEN)
}

impl Dispatch<wl_registry::WlRegistry, ()> for Client {
    fn event(
        state: &mut Self,
        registry: &wl_registry::WlRegistry,
        event: wl_registry::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        match event {
            wl_registry::Event::Global {
                name,
                interface,
                version,
            } => state.globals.announce(registry, name, &interface, version, qh),
            wl_registry::Event::GlobalRemove { name } => {
                log::debug!("global {name} removed");
            }
            _ => {}
        }
    }
}

impl Dispatch<wl_compositor::WlCompositor, ()> for Client {
    fn event(
        _: &mut Self,
        _: &wl_compositor::WlCompositor,
        _: wl_compositor::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<wl_surface::WlSurface, ()> for Client {
    fn event(
        _: &mut Self,
        _: &wl_surface::WlSurface,
        _: wl_surface::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<xdg_wm_base::XdgWmBase, ()> for Client {
    fn event(
        state: &mut Self,
        wm_base: &xdg_wm_base::XdgWmBase,
        event: xdg_wm_base::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let xdg_wm_base::Event::Ping { serial } = event {
            wm_base.pong(state.keepalive.ping(serial));
        }
    }
}

impl Dispatch<xdg_surface::XdgSurface, ()> for Client {
    fn event(
        state: &mut Self,
        xdg_surface: &xdg_surface::XdgSurface,
        event: xdg_surface::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let xdg_surface::Event::Configure { serial } = event {
            let ack = state.configure(serial);
            xdg_surface.ack_configure(ack);
        }
    }
}

impl Dispatch<xdg_toplevel::XdgToplevel, ()> for Client {
    fn event(
        state: &mut Self,
        _: &xdg_toplevel::XdgToplevel,
        event: xdg_toplevel::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        match event {
            xdg_toplevel::Event::Configure {
                width,
                height,
                states,
            } => {
                state.pending = Some(PendingToplevel {
                    width,
                    height,
                    fullscreen: states_fullscreen(&states),
                });
            }
            xdg_toplevel::Event::Close => SurfaceObserver::close(&mut state.shell, &mut state.ctx),
            _ => {}
        }
    }
}

impl Dispatch<wl_seat::WlSeat, ()> for Client {
    fn event(
        state: &mut Self,
        seat: &wl_seat::WlSeat,
        event: wl_seat::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        match event {
            wl_seat::Event::Capabilities {
                capabilities: WEnum::Value(caps),
            } => state.seat_capabilities(seat, caps, qh),
            wl_seat::Event::Name { name } => log::debug!("seat name: {name}"),
            _ => {}
        }
    }
}

impl Dispatch<wl_pointer::WlPointer, ()> for Client {
    fn event(
        state: &mut Self,
        _: &wl_pointer::WlPointer,
        event: wl_pointer::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let Some(event) = pointer::translate(event) {
            state.router.pointer(&mut state.ctx, event);
        }
    }
}
