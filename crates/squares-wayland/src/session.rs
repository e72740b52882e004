use std::io;

use anyhow::{Context, Result};
use squares_engine::config::SquaresConfig;
use squares_engine::core::{AppContext, EventPump};
use wayland_client::backend::WaylandError;
use wayland_client::protocol::wl_surface;
use wayland_client::{Connection, EventQueue};
use wayland_protocols::xdg::shell::client::{xdg_surface, xdg_toplevel};

use crate::client::Client;

/// Event queue plus the state its handlers dispatch into.
pub struct Session {
    queue: EventQueue<Client>,
    pub client: Client,
}

impl Session {
    /// Creates the queue, requests the registry and collects the globals
    /// with one blocking roundtrip.
    pub fn new(conn: &Connection, ctx: AppContext, config: &SquaresConfig) -> Result<Self> {
        let mut queue = conn.new_event_queue();
        let qh = queue.handle();
        conn.display().get_registry(&qh, ());

        let mut client = Client::new(ctx, config);
        queue
            .roundtrip(&mut client)
            .context("collecting registry globals")?;

        Ok(Self { queue, client })
    }

    /// Blocks until the first configure has been acknowledged, or the run
    /// flag clears.
    pub fn await_configure(&mut self) -> Result<()> {
        while self.client.awaiting_configure() && self.client.ctx.poll_interrupt() {
            self.queue
                .blocking_dispatch(&mut self.client)
                .context("waiting for the first configure")?;
        }
        Ok(())
    }
}

impl EventPump for Session {
    fn pump(&mut self) -> Result<()> {
        match self.queue.flush() {
            Ok(()) => {}
            // Socket buffer full; the rest goes out on the next pump.
            Err(e) if would_block(&e) => log::trace!("flush would block"),
            Err(e) => return Err(e).context("flushing requests"),
        }

        if let Some(guard) = self.queue.prepare_read() {
            match guard.read() {
                Ok(_) => {}
                Err(e) if would_block(&e) => {}
                Err(e) => return Err(e).context("reading events"),
            }
        }

        self.queue
            .dispatch_pending(&mut self.client)
            .context("dispatching events")?;
        Ok(())
    }

    fn app(&mut self) -> &mut AppContext {
        &mut self.client.ctx
    }
}

fn would_block(err: &WaylandError) -> bool {
    matches!(err, WaylandError::Io(e) if e.kind() == io::ErrorKind::WouldBlock)
}

/// The toplevel window's protocol objects. Dropping sends the destroy
/// requests, role objects first.
pub struct ShellWindow {
    surface: wl_surface::WlSurface,
    xdg_surface: xdg_surface::XdgSurface,
    toplevel: xdg_toplevel::XdgToplevel,
}

impl ShellWindow {
    pub fn create(session: &Session, config: &SquaresConfig) -> Result<Self> {
        let qh = session.queue.handle();
        let (compositor, wm_base) = session.client.globals.require()?;

        let surface = compositor.create_surface(&qh, ());
        let xdg_surface = wm_base.get_xdg_surface(&surface, &qh, ());
        let toplevel = xdg_surface.get_toplevel(&qh, ());

        toplevel.set_title(config.title.clone());
        if config.fullscreen {
            toplevel.set_fullscreen(None);
        }
        surface.commit();

        Ok(Self {
            surface,
            xdg_surface,
            toplevel,
        })
    }

    #[inline]
    pub fn surface(&self) -> &wl_surface::WlSurface {
        &self.surface
    }
}

impl Drop for ShellWindow {
    fn drop(&mut self) {
        self.toplevel.destroy();
        self.xdg_surface.destroy();
        self.surface.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_would_block_io_is_retried() {
        let full = WaylandError::Io(io::Error::from(io::ErrorKind::WouldBlock));
        assert!(would_block(&full));

        let broken = WaylandError::Io(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(!would_block(&broken));
    }
}
