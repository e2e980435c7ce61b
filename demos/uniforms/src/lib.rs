//! 2D uniforms demo.
//!
//! Draws a flat house shape transformed entirely in the vertex shader by a
//! scale, a rotation and a translation read from a uniform block.

use anyhow::Result;
use glam::{Vec2, Vec3};
use shape_core::context::{ShaderSource, ShaderStage};
use shape_core::scene::{self, RenderHandle, DEFAULT_CLEAR_COLOR};
use shape_core::transform::rotation_2d;
use shape_core::{Application, FrameRenderer, Geometry, GraphicsContext, MaterialUniform, Transform2d};
use shape_gl::shader_path;
use tracing::info;

const PROJECT_DIR: &str = env!("CARGO_MANIFEST_DIR");

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformsParams {
    pub material: MaterialUniform,
    pub scale: Vec2,
    pub translation: Vec2,
    /// Counter-clockwise rotation in radians.
    pub angle: f32,
}

impl Default for UniformsParams {
    fn default() -> Self {
        Self {
            material: MaterialUniform::new(1.0, Vec3::new(0.2, 0.2, 0.3)),
            scale: Vec2::new(0.5, 0.5),
            translation: Vec2::new(0.0, -0.25),
            angle: std::f32::consts::PI / 6.0,
        }
    }
}

impl UniformsParams {
    pub fn transform(&self) -> Transform2d {
        Transform2d {
            scale: self.scale,
            translation: self.translation,
            rotation: rotation_2d(self.angle),
        }
    }
}

#[derive(Debug, Default)]
pub struct UniformsDemo {
    pub params: UniformsParams,
    handle: Option<RenderHandle>,
}

impl UniformsDemo {
    pub fn new(params: UniformsParams) -> Self {
        Self {
            params,
            handle: None,
        }
    }

    pub fn handle(&self) -> Option<&RenderHandle> {
        self.handle.as_ref()
    }
}

pub fn shader_sources() -> [ShaderSource; 2] {
    [
        ShaderSource::new(ShaderStage::Vertex, shader_path(PROJECT_DIR, "base_vs.glsl")),
        ShaderSource::new(ShaderStage::Fragment, shader_path(PROJECT_DIR, "base_fs.glsl")),
    ]
}

impl Application for UniformsDemo {
    fn init(&mut self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        let program = ctx.create_program(&shader_sources())?;

        let geometry = Geometry::house();
        let handle = scene::build(ctx, &geometry, &self.params.material, &self.params.transform());
        scene::configure_view(ctx, program, DEFAULT_CLEAR_COLOR);

        info!(indices = handle.index_count, "house ready");
        self.handle = Some(handle);
        Ok(())
    }

    fn frame(&mut self, ctx: &mut dyn GraphicsContext) {
        if let Some(handle) = &self.handle {
            FrameRenderer::default().render(ctx, handle);
        }
    }
}
