use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppContext, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Squares".to_string(),
            initial_size: LogicalSize::new(256.0, 256.0),
        }
    }
}

/// Entry point for the toolkit-hosted loop.
pub struct Runtime;

impl Runtime {
    /// Opens one window and redraws it continuously until it is closed,
    /// the app asks to exit, or SIGINT arrives. The first fatal error ends
    /// the loop and is returned.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, ctx: AppContext, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            config,
            gpu_init,
            app,
            ctx,
            window: None,
            error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A: App> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    ctx: AppContext,

    window: Option<WindowEntry>,
    error: Option<anyhow::Error>,
}

impl<A: App> AppState<A> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.ctx.request_exit();
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntry::try_new(window, |w| pollster::block_on(Gpu::new(w, gpu_init)))
            .context("GPU initialization failed")?;

        entry
            .with_gpu(|gpu| self.app.on_init(gpu))
            .context("application init failed")?;

        entry.with_window(|w| w.request_redraw());
        self.window = Some(entry);
        Ok(())
    }

    fn redraw(&mut self) -> Result<AppControl> {
        let Some(entry) = self.window.as_mut() else {
            return Ok(AppControl::Continue);
        };

        let (app, ctx) = (&mut self.app, &mut self.ctx);
        let control = entry.with_mut(|fields| {
            let mut frame = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                app: &mut *ctx,
            };
            app.on_frame(&mut frame)
        })?;

        ctx.end_frame();
        Ok(control)
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.ctx.poll_interrupt() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw.
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if !self.ctx.is_running() {
            event_loop.exit();
            return;
        }

        if let Some(entry) = self.window.as_ref() {
            let scale = entry.with_window(|w| w.scale_factor());
            if let Some(ev) = translate_window_event(scale, &event) {
                self.app.on_pointer(&mut self.ctx, ev);
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.ctx.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => {
                if !self.ctx.poll_interrupt() {
                    event_loop.exit();
                    return;
                }

                match self.redraw() {
                    Ok(AppControl::Continue) => {}
                    Ok(AppControl::Exit) => {
                        self.ctx.request_exit();
                        event_loop.exit();
                    }
                    Err(e) => self.fail(event_loop, e),
                }
            }

            _ => {}
        }

        if !self.ctx.is_running() {
            event_loop.exit();
        }
    }
}
