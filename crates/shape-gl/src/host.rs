//! Window, GL context and run loop driving an [`Application`].

use anyhow::{bail, Context, Result};
use glium::backend::glutin::SimpleWindowBuilder;
use glium::backend::Facade;
use glium::winit::event::{Event, WindowEvent};
use glium::winit::event_loop::EventLoop;
use shape_core::{Application, GraphicsContext};
use tracing::{debug, error, info, trace};

use crate::config::HostConfig;
use crate::context::GlContext;
use crate::glsl::{self, GlslVersion};

/// Open a window, call `app.init` once, then `app.frame` on every redraw
/// until the window is closed.
///
/// Returns the first error from `init` without entering the loop.
pub fn run<A>(config: HostConfig, mut app: A) -> Result<()>
where
    A: Application + 'static,
{
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let (window, display) = SimpleWindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(config.width, config.height)
        .build(&event_loop);

    let gl_ctx = display.get_context();
    debug!("OPENGL_VERSION {}", gl_ctx.get_opengl_version_string());
    match glsl::best_supported(gl_ctx.as_ref()) {
        Some(GlslVersion::Glsl420) => {}
        found => bail!("GLSL 4.20 is required, context supports {found:?}"),
    }

    let size = window.inner_size();
    let mut ctx = GlContext::new((size.width, size.height), config.debug);

    app.init(&mut ctx).context("application init failed")?;
    info!(title = %config.title, width = size.width, height = size.height, "initialised");

    let mut frames: u64 = 0;

    #[allow(deprecated)]
    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!(frames, "window closed");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    display.resize(new_size.into());
                    ctx.resize(new_size.width, new_size.height);
                    ctx.set_viewport(new_size.width, new_size.height);
                    debug!(width = new_size.width, height = new_size.height, "resized");
                }
                WindowEvent::RedrawRequested => {
                    let target = display.draw();
                    ctx.clear();
                    app.frame(&mut ctx);
                    frames = frames.wrapping_add(1);
                    trace!(frames, "frame");
                    if let Err(err) = target.finish() {
                        error!("swap_buffers failed: {err}");
                        window_target.exit();
                    }
                }
                _ => (),
            },
            Event::AboutToWait => window.request_redraw(),
            _ => (),
        })
        .context("event loop terminated with an error")?;

    Ok(())
}
