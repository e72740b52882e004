use std::process::ExitCode;

use anyhow::{Context, Result};
use squares_engine::config::SquaresConfig;
use squares_engine::core::{
    install_interrupt_handler, usage, App, AppContext, AppControl, FrameCtx, Invocation,
    PointerObserver,
};
use squares_engine::device::{Gpu, GpuInit};
use squares_engine::input::{ClickRouter, PointerEvent};
use squares_engine::logging::{init_logging, LoggingConfig};
use squares_engine::render::instanced::SquareRenderer;
use squares_engine::render::{draw_frame, ShaderSources};
use squares_engine::window::{Runtime, RuntimeConfig};

const PROGRAM: &str = "squares";

/// The four squares hosted in a winit window.
struct Squares {
    renderer: Option<SquareRenderer>,
    router: ClickRouter,
}

impl App for Squares {
    fn on_init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let sources = ShaderSources::wgsl();
        let renderer = SquareRenderer::new(gpu.device(), gpu.surface_format(), &sources)
            .context("building the square pipeline")?;
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_pointer(&mut self, ctx: &mut AppContext, event: PointerEvent) {
        self.router.pointer(ctx, event);
    }

    fn on_frame(&mut self, frame: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(AppControl::Continue);
        };

        draw_frame(&mut frame.canvas(renderer))?;
        Ok(AppControl::Continue)
    }
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match Invocation::parse(std::env::args().skip(1)) {
        Invocation::Run => {}
        Invocation::Help => {
            print!("{}", usage(PROGRAM));
            return ExitCode::SUCCESS;
        }
        Invocation::Invalid(arg) => {
            eprintln!("unrecognized argument: {arg}");
            eprint!("{}", usage(PROGRAM));
            return ExitCode::from(2);
        }
    }

    if let Err(e) = install_interrupt_handler() {
        log::warn!("SIGINT handler not installed: {e}");
    }

    let app = Squares {
        renderer: None,
        router: ClickRouter::stdout(),
    };

    let gpu_init = GpuInit::default().with_frame_sync(SquaresConfig::default().frame_sync);
    match Runtime::run(RuntimeConfig::default(), gpu_init, AppContext::new(), app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
