//! Demo configuration.
//!
//! There are no behavior flags on the command line; these defaults are the
//! configuration. Binaries adjust fields in code.

use crate::coords::Geometry;
use crate::device::ConfigRequest;

/// Settings for one squares window.
#[derive(Debug, Clone, PartialEq)]
pub struct SquaresConfig {
    pub title: String,
    pub initial_size: Geometry,
    /// Ask for fullscreen right after the surface is created.
    pub fullscreen: bool,
    /// Drop the alpha channel requirement from the framebuffer config.
    pub opaque: bool,
    /// Exact framebuffer depth in bits.
    pub buffer_size: i32,
    /// Keep the driver's swap interval; off means swap interval 0.
    pub frame_sync: bool,
}

impl Default for SquaresConfig {
    fn default() -> Self {
        Self {
            title: "squares-wayland".to_string(),
            initial_size: Geometry::new(256, 256),
            fullscreen: false,
            opaque: false,
            buffer_size: 32,
            frame_sync: true,
        }
    }
}

impl SquaresConfig {
    pub fn config_request(&self) -> ConfigRequest {
        ConfigRequest {
            buffer_size: self.buffer_size,
            opaque: self.opaque,
            ..ConfigRequest::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_the_click_grid() {
        let cfg = SquaresConfig::default();
        assert_eq!(cfg.initial_size, Geometry::new(256, 256));
        assert_eq!(cfg.title, "squares-wayland");
        assert!(cfg.frame_sync);
        assert!(!cfg.fullscreen);
    }

    #[test]
    fn request_follows_depth_and_opacity() {
        let cfg = SquaresConfig {
            buffer_size: 16,
            opaque: true,
            ..SquaresConfig::default()
        };
        let req = cfg.config_request();
        assert_eq!(req.buffer_size, 16);
        assert!(req.opaque);
        assert_eq!(req.color_bits, 1);
        assert_eq!(req.alpha_bits(), 0);
    }
}
