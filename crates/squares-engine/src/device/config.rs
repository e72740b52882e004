//! Framebuffer configuration selection.
//!
//! The matching rule is kept apart from EGL so it can be checked without a
//! display: a candidate must be window-drawable, meet the minimum channel
//! depths, and report exactly the requested total buffer size. The first such
//! candidate in driver order wins.

use std::fmt;

use khronos_egl::{OPENGL_ES2_BIT, WINDOW_BIT};

/// Requested color/alpha/depth profile.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ConfigRequest {
    /// Minimum bits per color channel.
    pub color_bits: i32,
    /// Minimum alpha bits, before [`ConfigRequest::alpha_bits`] adjusts it.
    pub alpha_bits: i32,
    /// Exact total buffer size.
    pub buffer_size: i32,
    /// The surface never needs alpha.
    pub opaque: bool,
}

impl Default for ConfigRequest {
    fn default() -> Self {
        Self {
            color_bits: 1,
            alpha_bits: 1,
            buffer_size: 32,
            opaque: false,
        }
    }
}

impl ConfigRequest {
    /// Alpha depth actually required: none for opaque or 16-bit buffers.
    #[inline]
    pub fn alpha_bits(&self) -> i32 {
        if self.opaque || self.buffer_size == 16 {
            0
        } else {
            self.alpha_bits
        }
    }

    /// Attribute list for `eglChooseConfig`, `EGL_NONE` terminated.
    pub fn attrib_list(&self) -> [khronos_egl::Int; 13] {
        [
            khronos_egl::SURFACE_TYPE,
            WINDOW_BIT,
            khronos_egl::RED_SIZE,
            self.color_bits,
            khronos_egl::GREEN_SIZE,
            self.color_bits,
            khronos_egl::BLUE_SIZE,
            self.color_bits,
            khronos_egl::ALPHA_SIZE,
            self.alpha_bits(),
            khronos_egl::RENDERABLE_TYPE,
            OPENGL_ES2_BIT,
            khronos_egl::NONE,
        ]
    }

    /// Whether `info` satisfies every requirement, including the exact size.
    pub fn accepts(&self, info: &ConfigInfo) -> bool {
        info.surface_type & WINDOW_BIT != 0
            && info.renderable_type & OPENGL_ES2_BIT != 0
            && info.red >= self.color_bits
            && info.green >= self.color_bits
            && info.blue >= self.color_bits
            && info.alpha >= self.alpha_bits()
            && info.buffer_size == self.buffer_size
    }
}

/// Attributes of one framebuffer config as reported by the driver.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ConfigInfo {
    pub surface_type: i32,
    pub renderable_type: i32,
    pub red: i32,
    pub green: i32,
    pub blue: i32,
    pub alpha: i32,
    pub buffer_size: i32,
}

/// No candidate matched the request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NoMatchingConfig {
    pub request: ConfigRequest,
    /// Buffer sizes of the candidates that were rejected, in driver order.
    pub seen: Vec<i32>,
}

impl fmt::Display for NoMatchingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "did not find config with buffer size {} (candidates: {:?})",
            self.request.buffer_size, self.seen
        )
    }
}

impl std::error::Error for NoMatchingConfig {}

/// Picks the first candidate `request` accepts. There is no fallback.
pub fn choose_config<C>(
    candidates: impl IntoIterator<Item = (C, ConfigInfo)>,
    request: &ConfigRequest,
) -> Result<C, NoMatchingConfig> {
    let mut seen = Vec::new();
    for (config, info) in candidates {
        if request.accepts(&info) {
            return Ok(config);
        }
        seen.push(info.buffer_size);
    }

    Err(NoMatchingConfig {
        request: *request,
        seen,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(buffer_size: i32, alpha: i32) -> ConfigInfo {
        let color = if buffer_size == 16 { 5 } else { 8 };
        ConfigInfo {
            surface_type: WINDOW_BIT,
            renderable_type: OPENGL_ES2_BIT,
            red: color,
            green: color,
            blue: color,
            alpha,
            buffer_size,
        }
    }

    #[test]
    fn first_exact_buffer_size_wins() {
        let candidates = [("a", info(24, 0)), ("b", info(32, 8)), ("c", info(32, 8))];
        let picked = choose_config(candidates, &ConfigRequest::default()).unwrap();
        assert_eq!(picked, "b");
    }

    #[test]
    fn larger_buffers_are_not_a_fallback() {
        let req = ConfigRequest {
            buffer_size: 24,
            ..ConfigRequest::default()
        };
        let err = choose_config([(0, info(32, 8))], &req).unwrap_err();
        assert_eq!(err.seen, [32]);
        assert_eq!(err.to_string(), "did not find config with buffer size 24 (candidates: [32])");
    }

    #[test]
    fn empty_candidate_list_is_an_error() {
        let none: [(u8, ConfigInfo); 0] = [];
        assert!(choose_config(none, &ConfigRequest::default()).is_err());
    }

    #[test]
    fn opaque_or_16_bit_drops_the_alpha_requirement() {
        let opaque = ConfigRequest {
            opaque: true,
            ..ConfigRequest::default()
        };
        assert_eq!(opaque.alpha_bits(), 0);
        assert_eq!(ConfigRequest::default().alpha_bits(), 1);

        let rgb565 = ConfigRequest {
            buffer_size: 16,
            ..ConfigRequest::default()
        };
        assert_eq!(rgb565.alpha_bits(), 0);
        assert_eq!(choose_config([(7, info(16, 0))], &rgb565), Ok(7));
        assert_eq!(rgb565.attrib_list()[9], 0);
    }

    #[test]
    fn alpha_is_required_unless_dropped() {
        let req = ConfigRequest::default();
        assert!(!req.accepts(&info(32, 0)));
        assert!(req.accepts(&info(32, 8)));
    }

    #[test]
    fn non_window_configs_are_skipped() {
        let mut pbuffer_only = info(32, 8);
        pbuffer_only.surface_type = 0x0001;
        let candidates = [(1, pbuffer_only), (2, info(32, 8))];
        assert_eq!(choose_config(candidates, &ConfigRequest::default()), Ok(2));
    }

    #[test]
    fn attrib_list_is_none_terminated() {
        let attribs = ConfigRequest::default().attrib_list();
        assert_eq!(attribs.last(), Some(&khronos_egl::NONE));
        assert_eq!(attribs[1], WINDOW_BIT);
        assert_eq!(attribs[11], OPENGL_ES2_BIT);
    }
}
