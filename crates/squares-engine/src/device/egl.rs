//! EGL objects for the GLES2 path.
//!
//! Each object borrows the one it was created from, so the borrow checker
//! enforces the teardown order: the window surface goes first (unbinding the
//! context), then the context, then the display, and the compositor
//! connection last.

use std::ffi::c_void;
use std::fmt;

use khronos_egl as egl;
use wayland_client::protocol::wl_surface::WlSurface;
use wayland_client::{Connection, Proxy};
use wayland_egl::WlEglSurface;

use crate::coords::Geometry;
use crate::render::SwapTarget;

use super::config::{choose_config, ConfigInfo, ConfigRequest, NoMatchingConfig};

/// `EGL_BUFFER_AGE_EXT`.
const BUFFER_AGE_EXT: egl::Int = 0x313D;

const CONTEXT_ATTRIBS: [egl::Int; 3] = [egl::CONTEXT_CLIENT_VERSION, 2, egl::NONE];

#[derive(Debug)]
pub enum EglError {
    /// `eglGetDisplay` returned no display for the connection.
    NoDisplay,
    NoMatchingConfig(NoMatchingConfig),
    Call {
        call: &'static str,
        source: egl::Error,
    },
    /// The `wl_egl_window` could not be created.
    NativeWindow(String),
}

impl EglError {
    fn call(call: &'static str) -> impl FnOnce(egl::Error) -> Self {
        move |source| Self::Call { call, source }
    }
}

impl fmt::Display for EglError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EglError::NoDisplay => f.write_str("no EGL display for the Wayland connection"),
            EglError::NoMatchingConfig(e) => e.fmt(f),
            EglError::Call { call, source } => write!(f, "{call} failed: {source}"),
            EglError::NativeWindow(msg) => write!(f, "failed to create wl_egl_window: {msg}"),
        }
    }
}

impl std::error::Error for EglError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EglError::NoMatchingConfig(e) => Some(e),
            EglError::Call { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<NoMatchingConfig> for EglError {
    fn from(e: NoMatchingConfig) -> Self {
        Self::NoMatchingConfig(e)
    }
}

/// How frames reach the compositor.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SwapStrategy {
    /// Plain `eglSwapBuffers`.
    Full,
    /// Both damage extensions are present. Frames are still swapped in full,
    /// but buffer age is tracked.
    Damage,
}

impl SwapStrategy {
    /// Reads a space-separated extension string.
    pub fn from_extensions(extensions: &str) -> Self {
        let has = |name: &str| extensions.split_whitespace().any(|e| e == name);
        if has("EGL_EXT_swap_buffers_with_damage") && has("EGL_EXT_buffer_age") {
            SwapStrategy::Damage
        } else {
            SwapStrategy::Full
        }
    }

    #[inline]
    pub fn tracks_buffer_age(self) -> bool {
        self == SwapStrategy::Damage
    }
}

/// Initialized EGL display bound to a Wayland connection.
///
/// Holds a handle to the connection so the `wl_display` outlives the EGL
/// display. Dropping terminates the display and releases the thread state.
pub struct EglDisplay {
    egl: egl::Instance<egl::Static>,
    display: egl::Display,
    swap: SwapStrategy,
    _conn: Connection,
}

impl EglDisplay {
    /// Gets and initializes the EGL display for `conn`, then binds the
    /// OpenGL ES API.
    pub fn from_connection(conn: &Connection) -> Result<Self, EglError> {
        let egl = egl::Instance::new(egl::Static);
        let native = conn.backend().display_ptr() as *mut c_void;

        // The pointer stays valid while `_conn` keeps the connection open.
        let display = unsafe { egl.get_display(native) }.ok_or(EglError::NoDisplay)?;
        let version = egl.initialize(display).map_err(EglError::call("eglInitialize"))?;

        let mut this = Self {
            egl,
            display,
            swap: SwapStrategy::Full,
            _conn: conn.clone(),
        };

        this.egl
            .bind_api(egl::OPENGL_ES_API)
            .map_err(EglError::call("eglBindAPI"))?;

        let extensions = this
            .egl
            .query_string(Some(display), egl::EXTENSIONS)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        this.swap = SwapStrategy::from_extensions(&extensions);
        if this.swap.tracks_buffer_age() {
            log::info!("has EGL_EXT_buffer_age and EGL_EXT_swap_buffers_with_damage");
        } else {
            log::debug!("no damage extensions; using full swaps");
        }

        log::info!("EGL {}.{} initialized", version.0, version.1);
        Ok(this)
    }

    /// Chooses a config for `request` and creates a GLES2 context on it.
    pub fn create_context(&self, request: &ConfigRequest) -> Result<GraphicsContext<'_>, EglError> {
        let config = self.choose(request)?;
        let context = self
            .egl
            .create_context(self.display, config, None, &CONTEXT_ATTRIBS)
            .map_err(EglError::call("eglCreateContext"))?;

        Ok(GraphicsContext {
            display: self,
            config,
            context,
        })
    }

    fn choose(&self, request: &ConfigRequest) -> Result<egl::Config, EglError> {
        let count = self
            .egl
            .get_config_count(self.display)
            .map_err(EglError::call("eglGetConfigs"))?;

        let mut configs = Vec::with_capacity(count);
        self.egl
            .choose_config(self.display, &request.attrib_list(), &mut configs)
            .map_err(EglError::call("eglChooseConfig"))?;
        log::debug!("{} of {count} configs match the minimum depths", configs.len());

        let candidates = configs
            .into_iter()
            .map(|c| Ok((c, self.config_info(c)?)))
            .collect::<Result<Vec<_>, EglError>>()?;

        Ok(choose_config(candidates, request)?)
    }

    fn config_info(&self, config: egl::Config) -> Result<ConfigInfo, EglError> {
        let get = |attr| {
            self.egl
                .get_config_attrib(self.display, config, attr)
                .map_err(EglError::call("eglGetConfigAttrib"))
        };

        Ok(ConfigInfo {
            surface_type: get(egl::SURFACE_TYPE)?,
            renderable_type: get(egl::RENDERABLE_TYPE)?,
            red: get(egl::RED_SIZE)?,
            green: get(egl::GREEN_SIZE)?,
            blue: get(egl::BLUE_SIZE)?,
            alpha: get(egl::ALPHA_SIZE)?,
            buffer_size: get(egl::BUFFER_SIZE)?,
        })
    }
}

impl Drop for EglDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.egl.terminate(self.display) {
            log::warn!("eglTerminate failed: {e}");
        }
        if let Err(e) = self.egl.release_thread() {
            log::warn!("eglReleaseThread failed: {e}");
        }
    }
}

/// Framebuffer config plus the GLES2 context created on it.
///
/// Borrows its display, and window surfaces borrow the context, so a surface
/// can never outlive the context it is bound to:
///
/// ```compile_fail
/// use squares_engine::coords::Geometry;
/// use squares_engine::device::{ConfigRequest, EglDisplay};
/// use wayland_client::protocol::wl_surface::WlSurface;
///
/// fn outlive(display: &EglDisplay, wl_surface: &WlSurface) {
///     let context = display.create_context(&ConfigRequest::default()).unwrap();
///     let surface = context.create_surface(wl_surface, Geometry::new(256, 256)).unwrap();
///     drop(context);
///     drop(surface);
/// }
/// ```
///
/// Nested scopes give the right order without any manual sequencing:
///
/// ```no_run
/// use squares_engine::coords::Geometry;
/// use squares_engine::device::{ConfigRequest, EglDisplay};
/// use wayland_client::protocol::wl_surface::WlSurface;
///
/// fn scoped(display: &EglDisplay, wl_surface: &WlSurface) -> anyhow::Result<()> {
///     let context = display.create_context(&ConfigRequest::default())?;
///     let surface = context.create_surface(wl_surface, Geometry::new(256, 256))?;
///     drop(surface);
///     drop(context);
///     Ok(())
/// }
/// ```
pub struct GraphicsContext<'d> {
    display: &'d EglDisplay,
    config: egl::Config,
    context: egl::Context,
}

impl GraphicsContext<'_> {
    /// Wraps `wl_surface` in a native EGL window of `size`, creates the
    /// window surface and makes it current for draw and read.
    pub fn create_surface(
        &self,
        wl_surface: &WlSurface,
        size: Geometry,
    ) -> Result<WindowSurface<'_>, EglError> {
        let native = WlEglSurface::new(wl_surface.id(), size.width, size.height)
            .map_err(|e| EglError::NativeWindow(format!("{e:?}")))?;

        let egl = &self.display.egl;
        let surface = unsafe {
            egl.create_window_surface(
                self.display.display,
                self.config,
                native.ptr() as egl::NativeWindowType,
                None,
            )
        }
        .map_err(EglError::call("eglCreateWindowSurface"))?;

        let window = WindowSurface {
            context: self,
            surface,
            size,
            native,
        };

        egl.make_current(
            self.display.display,
            Some(surface),
            Some(surface),
            Some(self.context),
        )
        .map_err(EglError::call("eglMakeCurrent"))?;

        Ok(window)
    }
}

impl Drop for GraphicsContext<'_> {
    fn drop(&mut self) {
        if let Err(e) = self
            .display
            .egl
            .destroy_context(self.display.display, self.context)
        {
            log::warn!("eglDestroyContext failed: {e}");
        }
    }
}

/// EGL window surface over a `wl_egl_window`, current on this thread.
pub struct WindowSurface<'c> {
    context: &'c GraphicsContext<'c>,
    surface: egl::Surface,
    size: Geometry,
    // Dropped after the EGL surface is destroyed in `Drop::drop`.
    native: WlEglSurface,
}

impl WindowSurface<'_> {
    #[inline]
    pub fn size(&self) -> Geometry {
        self.size
    }

    /// Loads GL entry points for the current context.
    pub fn load_gl(&self) -> glow::Context {
        let egl = &self.context.display.egl;
        unsafe {
            glow::Context::from_loader_function(|name| {
                egl.get_proc_address(name)
                    .map_or(std::ptr::null(), |f| f as *const c_void)
            })
        }
    }

    /// Swap interval 0 when frame sync is off; the driver default otherwise.
    pub fn apply_frame_sync(&self, frame_sync: bool) -> Result<(), EglError> {
        if frame_sync {
            return Ok(());
        }
        let d = self.context.display;
        d.egl
            .swap_interval(d.display, 0)
            .map_err(EglError::call("eglSwapInterval"))
    }

    /// Resizes the native window in place. Empty or unchanged sizes are
    /// ignored.
    pub fn resize(&mut self, size: Geometry) {
        if size.is_empty() || size == self.size {
            return;
        }
        self.native.resize(size.width, size.height, 0, 0);
        self.size = size;
        log::debug!("native window resized to {}x{}", size.width, size.height);
    }

    /// Age of the back buffer in frames, when the damage extensions are
    /// present.
    pub fn buffer_age(&self) -> Option<i32> {
        let d = self.context.display;
        if !d.swap.tracks_buffer_age() {
            return None;
        }
        d.egl.query_surface(d.display, self.surface, BUFFER_AGE_EXT).ok()
    }
}

impl SwapTarget for WindowSurface<'_> {
    fn swap(&mut self) -> anyhow::Result<()> {
        if let Some(age) = self.buffer_age() {
            log::trace!("buffer age {age}");
        }

        let d = self.context.display;
        d.egl
            .swap_buffers(d.display, self.surface)
            .map_err(EglError::call("eglSwapBuffers"))?;
        Ok(())
    }
}

impl Drop for WindowSurface<'_> {
    fn drop(&mut self) {
        let d = self.context.display;
        if let Err(e) = d.egl.make_current(d.display, None, None, None) {
            log::warn!("eglMakeCurrent(none) failed: {e}");
        }
        if let Err(e) = d.egl.destroy_surface(d.display, self.surface) {
            log::warn!("eglDestroySurface failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_needs_both_extensions() {
        let both = "EGL_KHR_image_base EGL_EXT_buffer_age EGL_EXT_swap_buffers_with_damage";
        assert_eq!(SwapStrategy::from_extensions(both), SwapStrategy::Damage);
        assert_eq!(
            SwapStrategy::from_extensions("EGL_EXT_buffer_age"),
            SwapStrategy::Full
        );
        assert_eq!(SwapStrategy::from_extensions(""), SwapStrategy::Full);
    }

    #[test]
    fn extension_names_match_whole_tokens() {
        let lookalike = "EGL_EXT_buffer_age_2 EGL_EXT_swap_buffers_with_damage";
        assert_eq!(SwapStrategy::from_extensions(lookalike), SwapStrategy::Full);
    }

    #[test]
    fn config_error_reads_like_the_config_failure() {
        let err = EglError::from(NoMatchingConfig {
            request: ConfigRequest::default(),
            seen: vec![],
        });
        assert_eq!(err.to_string(), "did not find config with buffer size 32 (candidates: [])");
    }
}
