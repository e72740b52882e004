use crate::coords::Geometry;
use crate::core::{AppContext, SurfaceObserver};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShellState {
    /// No configure received yet.
    Unconfigured,
    Normal,
    Fullscreen,
    /// Terminal.
    Closed,
}

/// One configure sequence as delivered by the compositor.
///
/// A zero width or height means "client decides".
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Configure {
    pub width: i32,
    pub height: i32,
    pub fullscreen: bool,
    pub serial: u32,
}

/// What the client must do after a configure.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ConfigureOutcome {
    /// Serial to acknowledge. Always the configure's own serial.
    pub ack_serial: u32,
    /// New backing-store size, when it changed.
    pub resize: Option<Geometry>,
}

/// Shell surface state machine.
///
/// `geometry` is the size the backing store should have; `window_size` is the
/// last non-fullscreen size, restored when the compositor leaves sizing to
/// the client.
#[derive(Debug, Clone)]
pub struct ShellSurface {
    state: ShellState,
    geometry: Geometry,
    window_size: Geometry,
}

impl ShellSurface {
    pub fn new(initial: Geometry) -> Self {
        Self {
            state: ShellState::Unconfigured,
            geometry: initial,
            window_size: initial,
        }
    }

    #[inline]
    pub fn state(&self) -> ShellState {
        self.state
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[inline]
    pub fn window_size(&self) -> Geometry {
        self.window_size
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.state == ShellState::Closed
    }

    pub fn apply(&mut self, configure: Configure) -> ConfigureOutcome {
        let ack_serial = configure.serial;
        if self.is_closed() {
            log::debug!("configure {ack_serial} after close ignored");
            return ConfigureOutcome {
                ack_serial,
                resize: None,
            };
        }

        let requested = Geometry::new(configure.width, configure.height);
        let mut geometry = self.geometry;

        if !requested.is_empty() {
            if !configure.fullscreen {
                self.window_size = requested;
            }
            geometry = requested;
        } else if !configure.fullscreen {
            geometry = self.window_size;
        }

        self.state = if configure.fullscreen {
            ShellState::Fullscreen
        } else {
            ShellState::Normal
        };

        let resize = (geometry != self.geometry).then_some(geometry);
        self.geometry = geometry;

        log::debug!(
            "configure {ack_serial}: {}x{} -> {:?} {}x{}",
            configure.width,
            configure.height,
            self.state,
            geometry.width,
            geometry.height
        );

        ConfigureOutcome { ack_serial, resize }
    }

    pub fn close(&mut self) {
        self.state = ShellState::Closed;
    }
}

impl SurfaceObserver for ShellSurface {
    fn configure(&mut self, _ctx: &mut AppContext, configure: Configure) -> ConfigureOutcome {
        self.apply(configure)
    }

    fn close(&mut self, ctx: &mut AppContext) {
        log::info!("surface closed by compositor");
        ShellSurface::close(self);
        ctx.request_exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(width: i32, height: i32, fullscreen: bool, serial: u32) -> Configure {
        Configure {
            width,
            height,
            fullscreen,
            serial,
        }
    }

    #[test]
    fn zero_size_keeps_the_remembered_size() {
        let mut shell = ShellSurface::new(Geometry::new(256, 256));
        let out = shell.apply(cfg(400, 300, false, 1));
        assert_eq!(out.resize, Some(Geometry::new(400, 300)));
        assert_eq!(shell.state(), ShellState::Normal);

        let out = shell.apply(cfg(0, 0, false, 2));
        assert_eq!(out, ConfigureOutcome { ack_serial: 2, resize: None });
        assert_eq!(shell.geometry(), Geometry::new(400, 300));
    }

    #[test]
    fn first_zero_configure_uses_the_initial_size() {
        let mut shell = ShellSurface::new(Geometry::new(256, 256));
        let out = shell.apply(cfg(0, 0, false, 9));
        assert_eq!(out.resize, None);
        assert_eq!(out.ack_serial, 9);
        assert_eq!(shell.state(), ShellState::Normal);
    }

    #[test]
    fn fullscreen_does_not_overwrite_the_restored_size() {
        let mut shell = ShellSurface::new(Geometry::new(256, 256));
        shell.apply(cfg(400, 300, false, 1));

        let out = shell.apply(cfg(1920, 1080, true, 2));
        assert_eq!(out.resize, Some(Geometry::new(1920, 1080)));
        assert_eq!(shell.state(), ShellState::Fullscreen);
        assert_eq!(shell.window_size(), Geometry::new(400, 300));

        let out = shell.apply(cfg(0, 0, false, 3));
        assert_eq!(out.resize, Some(Geometry::new(400, 300)));
        assert_eq!(shell.state(), ShellState::Normal);
    }

    #[test]
    fn zero_size_while_fullscreen_keeps_current_geometry() {
        let mut shell = ShellSurface::new(Geometry::new(256, 256));
        shell.apply(cfg(1920, 1080, true, 1));
        let out = shell.apply(cfg(0, 0, true, 2));
        assert_eq!(out.resize, None);
        assert_eq!(shell.geometry(), Geometry::new(1920, 1080));
    }

    #[test]
    fn half_zero_size_counts_as_client_decides() {
        let mut shell = ShellSurface::new(Geometry::new(256, 256));
        shell.apply(cfg(400, 300, false, 1));
        let out = shell.apply(cfg(800, 0, false, 2));
        assert_eq!(out.resize, None);
        assert_eq!(shell.geometry(), Geometry::new(400, 300));
    }

    #[test]
    fn closed_is_terminal_but_still_acks() {
        let mut ctx = AppContext::detached();
        let mut shell = ShellSurface::new(Geometry::new(256, 256));
        SurfaceObserver::close(&mut shell, &mut ctx);
        assert!(!ctx.is_running());

        let out = shell.configure(&mut ctx, cfg(640, 480, true, 5));
        assert_eq!(out, ConfigureOutcome { ack_serial: 5, resize: None });
        assert_eq!(shell.state(), ShellState::Closed);
        assert_eq!(shell.geometry(), Geometry::new(256, 256));
    }
}
