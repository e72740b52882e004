use wayland_client::QueueHandle;
use wayland_client::protocol::{wl_compositor, wl_registry, wl_seat};
use wayland_protocols::xdg::shell::client::xdg_wm_base;

use crate::client::Client;
use crate::error::ConnectionError;

const COMPOSITOR_VERSION: u32 = 4;
const WM_BASE_VERSION: u32 = 1;
const SEAT_VERSION: u32 = 5;

/// Globals the client binds.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Interface {
    Compositor,
    WmBase,
    Seat,
}

impl Interface {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "wl_compositor" => Some(Interface::Compositor),
            "xdg_wm_base" => Some(Interface::WmBase),
            "wl_seat" => Some(Interface::Seat),
            _ => None,
        }
    }

    fn supported(self) -> u32 {
        match self {
            Interface::Compositor => COMPOSITOR_VERSION,
            Interface::WmBase => WM_BASE_VERSION,
            Interface::Seat => SEAT_VERSION,
        }
    }

    /// Version to bind at: the lower of what is offered and what we speak.
    pub fn negotiate(self, offered: u32) -> u32 {
        offered.min(self.supported())
    }
}

/// Bound registry globals. Collected during the startup roundtrip.
#[derive(Debug, Default)]
pub struct Globals {
    pub compositor: Option<wl_compositor::WlCompositor>,
    pub wm_base: Option<xdg_wm_base::XdgWmBase>,
    pub seat: Option<wl_seat::WlSeat>,
}

impl Globals {
    pub fn announce(
        &mut self,
        registry: &wl_registry::WlRegistry,
        name: u32,
        interface: &str,
        version: u32,
        qh: &QueueHandle<Client>,
    ) {
        let Some(known) = Interface::from_name(interface) else {
            log::trace!("ignoring global {name}: {interface} v{version}");
            return;
        };
        let version = known.negotiate(version);

        match known {
            Interface::Compositor if self.compositor.is_none() => {
                self.compositor = Some(registry.bind(name, version, qh, ()));
            }
            Interface::WmBase if self.wm_base.is_none() => {
                self.wm_base = Some(registry.bind(name, version, qh, ()));
            }
            Interface::Seat if self.seat.is_none() => {
                self.seat = Some(registry.bind(name, version, qh, ()));
            }
            _ => {
                log::debug!("already bound {interface}; ignoring global {name}");
                return;
            }
        }
        log::debug!("bound {interface} v{version} (global {name})");
    }

    /// The globals the client cannot run without.
    pub fn require(
        &self,
    ) -> Result<(&wl_compositor::WlCompositor, &xdg_wm_base::XdgWmBase), ConnectionError> {
        let compositor = self
            .compositor
            .as_ref()
            .ok_or(ConnectionError::MissingGlobal("wl_compositor"))?;
        let wm_base = self
            .wm_base
            .as_ref()
            .ok_or(ConnectionError::MissingGlobal("xdg_wm_base"))?;

        if self.seat.is_none() {
            log::warn!("no wl_seat advertised; clicks will not be reported");
        }
        Ok((compositor, wm_base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_three_globals_are_known() {
        assert_eq!(Interface::from_name("wl_compositor"), Some(Interface::Compositor));
        assert_eq!(Interface::from_name("xdg_wm_base"), Some(Interface::WmBase));
        assert_eq!(Interface::from_name("wl_seat"), Some(Interface::Seat));
        assert_eq!(Interface::from_name("wl_shm"), None);
        assert_eq!(Interface::from_name("zxdg_shell_v6"), None);
    }

    #[test]
    fn versions_are_capped_at_what_we_speak() {
        assert_eq!(Interface::Seat.negotiate(9), SEAT_VERSION);
        assert_eq!(Interface::Seat.negotiate(2), 2);
        assert_eq!(Interface::WmBase.negotiate(6), 1);
        assert_eq!(Interface::Compositor.negotiate(6), COMPOSITOR_VERSION);
    }

    #[test]
    fn empty_registry_is_missing_the_compositor() {
        let globals = Globals::default();
        let err = globals.require().unwrap_err();
        assert!(matches!(err, ConnectionError::MissingGlobal("wl_compositor")));
    }
}
