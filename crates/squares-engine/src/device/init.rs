/// Initialization parameters for the wgpu layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may pick from.
    ///
    /// Defaults to GL so the toolkit variant renders through OpenGL ES like
    /// the bare Wayland client.
    pub backends: wgpu::Backends,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface. A hint only.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::GL,
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Maps the frame-sync switch onto a present mode.
    ///
    /// Without frame sync the surface presents immediately when the backend
    /// allows it; otherwise FIFO paces frames to the display.
    pub fn with_frame_sync(mut self, frame_sync: bool) -> Self {
        self.present_mode = if frame_sync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pin_the_gl_backend() {
        let init = GpuInit::default();
        assert_eq!(init.backends, wgpu::Backends::GL);
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
    }

    #[test]
    fn frame_sync_off_drops_vsync() {
        let init = GpuInit::default().with_frame_sync(false);
        assert_eq!(init.present_mode, wgpu::PresentMode::AutoNoVsync);
        let init = init.with_frame_sync(true);
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
    }
}
