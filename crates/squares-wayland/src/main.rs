//! Four colored squares on a bare Wayland connection.
//!
//! EGL objects are nested scopes over the connection; the shell window's
//! protocol objects are destroyed only after the EGL surface drawing into
//! them is gone.

mod client;
mod error;
mod globals;
mod pointer;
mod session;

use std::process::ExitCode;

use anyhow::{Context, Result};
use squares_engine::config::SquaresConfig;
use squares_engine::core::{install_interrupt_handler, usage, AppContext, Invocation};
use squares_engine::device::EglDisplay;
use squares_engine::logging::{init_logging, LoggingConfig};
use squares_engine::render::gles::GlesRenderer;
use squares_engine::render::{draw_frame, ShaderSources};
use wayland_client::Connection;

use crate::error::ConnectionError;
use crate::session::{Session, ShellWindow};

const PROGRAM: &str = "squares-wayland";

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

    match run(SquaresConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: SquaresConfig) -> Result<()> {
    install_interrupt_handler().context("installing the SIGINT handler")?;

    let conn = Connection::connect_to_env().map_err(ConnectionError::from)?;
    let mut session = Session::new(&conn, AppContext::new(), &config)?;
    let window = ShellWindow::create(&session, &config)?;
    session.await_configure()?;

    let display = EglDisplay::from_connection(&conn).context("initializing EGL")?;
    let context = display
        .create_context(&config.config_request())
        .context("creating the GLES2 context")?;
    let mut surface = context
        .create_surface(window.surface(), config.initial_size)
        .context("creating the window surface")?;
    surface.apply_frame_sync(config.frame_sync)?;

    let renderer = GlesRenderer::new(surface.load_gl(), &ShaderSources::gles2())
        .context("building the square program")?;
    renderer.set_viewport(surface.size());

    let frames = squares_engine::core::run(&mut session, |session| {
        if let Some(size) = session.client.take_resize() {
            surface.resize(size);
            renderer.set_viewport(size);
        }
        window.surface().set_opaque_region(None);
        draw_frame(&mut renderer.canvas(&mut surface))
    })?;

    log::info!("{PROGRAM} exiting");
    log::debug!("{frames} frames drawn");
    Ok(())
}
