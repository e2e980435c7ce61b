//! One-shot upload of a shape and its uniform blocks into GPU objects.

use tracing::debug;

use crate::context::{BufferId, BufferTarget, GraphicsContext, ProgramId, VertexArrayId};
use crate::geometry::{Geometry, Vertex};
use crate::uniforms::UniformBlock;

/// Background used by both demos.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.81, 0.81, 0.8, 1.0];

/// Everything [`build`] allocated.
///
/// The objects are owned by the graphics context and live until it is
/// destroyed; dropping the handle releases nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderHandle {
    pub vertex_array: VertexArrayId,
    pub vertex_buffer: BufferId,
    pub index_buffer: BufferId,
    pub material_buffer: BufferId,
    pub transform_buffer: BufferId,
    pub index_count: usize,
}

/// Upload `geometry` and both uniform blocks and record a vertex array
/// object describing them.
///
/// Every call allocates new objects; calling it twice leaves the first set
/// alive but unreferenced.
pub fn build<M, T>(
    ctx: &mut dyn GraphicsContext,
    geometry: &Geometry,
    material: &M,
    transform: &T,
) -> RenderHandle
where
    M: UniformBlock,
    T: UniformBlock,
{
    let index_buffer = ctx.create_buffer(BufferTarget::ElementArray, geometry.index_bytes());
    let vertex_buffer = ctx.create_buffer(BufferTarget::Array, geometry.vertex_bytes());
    let material_buffer = ctx.create_buffer(BufferTarget::Uniform, &material.to_std140());
    let transform_buffer = ctx.create_buffer(BufferTarget::Uniform, &transform.to_std140());

    debug!(
        vertices = geometry.vertices().len(),
        indices = geometry.index_count(),
        material_bytes = M::SIZE,
        transform_bytes = T::SIZE,
        "uploaded scene buffers"
    );

    let vertex_array = ctx.create_vertex_array();
    ctx.bind_vertex_array(Some(vertex_array));

    ctx.bind_uniform_block(M::BINDING, material_buffer);
    ctx.bind_uniform_block(T::BINDING, transform_buffer);

    ctx.bind_buffer(BufferTarget::Array, Some(vertex_buffer));
    for attribute in &Vertex::ATTRIBUTES {
        ctx.vertex_attribute(attribute);
    }
    ctx.bind_buffer(BufferTarget::ElementArray, Some(index_buffer));

    ctx.bind_buffer(BufferTarget::Array, None);
    ctx.bind_vertex_array(None);

    RenderHandle {
        vertex_array,
        vertex_buffer,
        index_buffer,
        material_buffer,
        transform_buffer,
        index_count: geometry.index_count(),
    }
}

/// Set the clear color, size the viewport to the framebuffer and make
/// `program` current.
pub fn configure_view(ctx: &mut dyn GraphicsContext, program: ProgramId, clear_color: [f32; 4]) {
    ctx.set_clear_color(clear_color);
    let (width, height) = ctx.frame_buffer_size();
    ctx.set_viewport(width, height);
    ctx.use_program(program);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingContext;
    use crate::uniforms::{pack_material, pack_transform_3d, MaterialUniform, Transform3d};
    use glam::{Mat4, Vec3};

    fn build_pyramid(ctx: &mut RecordingContext) -> RenderHandle {
        build(
            ctx,
            &Geometry::pyramid(),
            &MaterialUniform::new(1.0, Vec3::new(0.9, 0.8, 0.7)),
            &Transform3d { pvm: Mat4::IDENTITY },
        )
    }

    #[test]
    fn uploads_all_four_buffers() {
        let mut ctx = RecordingContext::new(650, 480);
        let handle = build_pyramid(&mut ctx);
        let pyramid = Geometry::pyramid();

        assert_eq!(ctx.buffer_data(handle.vertex_buffer), Some(pyramid.vertex_bytes()));
        assert_eq!(ctx.buffer_data(handle.index_buffer), Some(pyramid.index_bytes()));
        assert_eq!(
            ctx.buffer_data(handle.material_buffer),
            Some(&pack_material(1.0, Vec3::new(0.9, 0.8, 0.7))[..])
        );
        assert_eq!(
            ctx.buffer_data(handle.transform_buffer),
            Some(&pack_transform_3d(&Mat4::IDENTITY)[..])
        );
        assert_eq!(handle.index_count, 18);
    }

    #[test]
    fn vertex_array_captures_layout_and_indices() {
        let mut ctx = RecordingContext::new(650, 480);
        let handle = build_pyramid(&mut ctx);

        let vao = ctx.vertex_array(handle.vertex_array).unwrap();
        assert_eq!(vao.element_buffer, Some(handle.index_buffer));
        assert_eq!(vao.attributes.len(), 2);
        for attribute in &Vertex::ATTRIBUTES {
            assert_eq!(
                vao.attributes.get(&attribute.location),
                Some(&(*attribute, handle.vertex_buffer))
            );
        }
    }

    #[test]
    fn uniform_blocks_bound_to_declared_points() {
        let mut ctx = RecordingContext::new(650, 480);
        let handle = build_pyramid(&mut ctx);
        assert_eq!(ctx.uniform_bindings.get(&0), Some(&handle.material_buffer));
        assert_eq!(ctx.uniform_bindings.get(&1), Some(&handle.transform_buffer));
    }

    #[test]
    fn leaves_nothing_bound() {
        let mut ctx = RecordingContext::new(650, 480);
        build_pyramid(&mut ctx);
        assert_eq!(ctx.bound_vertex_array, None);
        assert_eq!(ctx.bound_array_buffer, None);
    }

    #[test]
    fn building_twice_allocates_twice() {
        let mut ctx = RecordingContext::new(650, 480);
        let first = build_pyramid(&mut ctx);
        let second = build_pyramid(&mut ctx);
        assert_ne!(first.vertex_array, second.vertex_array);
        assert_eq!(ctx.buffers.len(), 8);
    }

    #[test]
    fn configure_view_uses_framebuffer_size() {
        let mut ctx = RecordingContext::new(800, 600);
        configure_view(&mut ctx, ProgramId(7), DEFAULT_CLEAR_COLOR);
        assert_eq!(ctx.viewport, Some((800, 600)));
        assert_eq!(ctx.current_program, Some(ProgramId(7)));
        assert_eq!(ctx.clear_color, Some(DEFAULT_CLEAR_COLOR));
    }
}
