//! The [`Application`] trait, the interface a host run loop drives.
//!
//! The host calls [`Application::init`] once after the graphics context is
//! current, then [`Application::frame`] once per displayed frame.

use crate::context::GraphicsContext;

/// A demo program.
///
/// Implementors keep the handles they create in `init` and use them from
/// `frame`.
///
/// # Example
///
/// ```rust
/// use shape_core::app::Application;
/// use shape_core::context::GraphicsContext;
/// use shape_core::geometry::Geometry;
/// use shape_core::renderer::FrameRenderer;
/// use shape_core::scene::{self, RenderHandle};
/// use shape_core::uniforms::{MaterialUniform, Transform3d};
///
/// #[derive(Default)]
/// struct Demo {
///     handle: Option<RenderHandle>,
/// }
///
/// impl Application for Demo {
///     fn init(&mut self, ctx: &mut dyn GraphicsContext) -> anyhow::Result<()> {
///         let material = MaterialUniform::new(1.0, glam::Vec3::ONE);
///         let transform = Transform3d { pvm: glam::Mat4::IDENTITY };
///         self.handle = Some(scene::build(ctx, &Geometry::pyramid(), &material, &transform));
///         Ok(())
///     }
///
///     fn frame(&mut self, ctx: &mut dyn GraphicsContext) {
///         if let Some(handle) = &self.handle {
///             FrameRenderer::solid().render(ctx, handle);
///         }
///     }
/// }
/// ```
pub trait Application {
    /// Called once when the graphics context is first available.
    ///
    /// Create the program, buffers and vertex arrays here. An error aborts
    /// the host before the first frame.
    fn init(&mut self, ctx: &mut dyn GraphicsContext) -> anyhow::Result<()>;

    /// Called every frame to issue draw calls.
    fn frame(&mut self, ctx: &mut dyn GraphicsContext);
}
