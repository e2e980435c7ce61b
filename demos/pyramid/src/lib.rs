//! Pyramid demo.
//!
//! Draws a five-faced pyramid through a perspective camera. The fragment
//! shader scales vertex colors by a material block; the vertex shader reads a
//! single combined projection * view * model matrix.

use anyhow::Result;
use glam::{Mat4, Vec3};
use shape_core::context::{ShaderSource, ShaderStage};
use shape_core::scene::{self, RenderHandle, DEFAULT_CLEAR_COLOR};
use shape_core::transform::{aspect_ratio, compose_pvm, model_rotation_z, Camera};
use shape_core::{Application, FrameRenderer, Geometry, GraphicsContext, MaterialUniform, Transform3d};
use shape_gl::shader_path;
use tracing::info;

const PROJECT_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// Tunable inputs of the pyramid scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyramidParams {
    pub material: MaterialUniform,
    pub camera: Camera,
    /// Model rotation about +Z, in degrees.
    pub model_rotation: f32,
}

impl Default for PyramidParams {
    fn default() -> Self {
        Self {
            material: MaterialUniform::new(1.0, Vec3::new(0.9, 0.8, 0.7)),
            camera: Camera::default(),
            model_rotation: 115.0,
        }
    }
}

impl PyramidParams {
    /// Projection * view * model for a framebuffer of the given size.
    pub fn pvm(&self, width: u32, height: u32) -> Mat4 {
        compose_pvm(
            self.camera.projection(aspect_ratio(width, height)),
            self.camera.view(),
            model_rotation_z(self.model_rotation),
        )
    }
}

#[derive(Debug, Default)]
pub struct PyramidDemo {
    pub params: PyramidParams,
    handle: Option<RenderHandle>,
}

impl PyramidDemo {
    pub fn new(params: PyramidParams) -> Self {
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

impl Application for PyramidDemo {
    fn init(&mut self, ctx: &mut dyn GraphicsContext) -> Result<()> {
        let program = ctx.create_program(&shader_sources())?;

        let (width, height) = ctx.frame_buffer_size();
        let transform = Transform3d {
            pvm: self.params.pvm(width, height),
        };

        let geometry = Geometry::pyramid();
        let handle = scene::build(ctx, &geometry, &self.params.material, &transform);
        scene::configure_view(ctx, program, DEFAULT_CLEAR_COLOR);

        info!(indices = handle.index_count, "pyramid ready");
        self.handle = Some(handle);
        Ok(())
    }

    fn frame(&mut self, ctx: &mut dyn GraphicsContext) {
        if let Some(handle) = &self.handle {
            FrameRenderer::solid().render(ctx, handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_core::context::Capability;
    use shape_core::uniforms::{pack_material, pack_transform_3d};
    use shape_core::RecordingContext;

    #[test]
    fn shaders_exist() {
        for source in shader_sources() {
            assert!(source.path.is_file(), "missing {}", source.path.display());
        }
    }

    #[test]
    fn init_uploads_scene() {
        let mut ctx = RecordingContext::new(650, 480);
        let mut demo = PyramidDemo::default();
        demo.init(&mut ctx).unwrap();

        let handle = *demo.handle().unwrap();
        assert_eq!(handle.index_count, 18);
        assert_eq!(
            ctx.buffer_data(handle.material_buffer),
            Some(&pack_material(1.0, Vec3::new(0.9, 0.8, 0.7))[..])
        );
        assert_eq!(
            ctx.buffer_data(handle.transform_buffer),
            Some(&pack_transform_3d(&demo.params.pvm(650, 480))[..])
        );
        assert_eq!(ctx.viewport, Some((650, 480)));
        assert_eq!(ctx.clear_color, Some(DEFAULT_CLEAR_COLOR));
        assert_eq!(ctx.current_program, Some(ctx.programs[0].0));
        assert_eq!(ctx.programs[0].1, shader_sources().to_vec());
    }

    #[test]
    fn aspect_ratio_follows_framebuffer() {
        let params = PyramidParams::default();
        assert_ne!(params.pvm(650, 480), params.pvm(480, 650));
    }

    #[test]
    fn frame_draws_with_depth_and_culling() {
        let mut ctx = RecordingContext::new(650, 480);
        let mut demo = PyramidDemo::default();
        demo.init(&mut ctx).unwrap();
        demo.frame(&mut ctx);
        demo.frame(&mut ctx);

        assert_eq!(ctx.draw_calls(), vec![18, 18]);
        assert!(ctx.enabled.contains(&Capability::DepthTest));
        assert!(ctx.enabled.contains(&Capability::CullFace));
    }

    #[test]
    fn program_failure_aborts_init() {
        let mut ctx = RecordingContext::new(650, 480).failing_programs();
        let mut demo = PyramidDemo::default();
        assert!(demo.init(&mut ctx).is_err());
        assert!(demo.handle().is_none());
        assert!(ctx.buffers.is_empty());

        demo.frame(&mut ctx);
        assert!(ctx.draw_calls().is_empty());
    }
}
