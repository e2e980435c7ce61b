//! Per-frame draw of a prepared [`RenderHandle`].

use tracing::trace;

use crate::context::{Capability, GraphicsContext};
use crate::scene::RenderHandle;

/// Bind the handle's vertex array, issue one indexed triangle draw of
/// `index_count` indices, then unbind.
pub fn draw(ctx: &mut dyn GraphicsContext, handle: &RenderHandle, index_count: usize) {
    ctx.bind_vertex_array(Some(handle.vertex_array));
    ctx.draw_indexed_triangles(index_count);
    ctx.bind_vertex_array(None);
    trace!(index_count, "drew frame");
}

/// Fixed-function state a demo wants on while drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameRenderer {
    pub depth_test: bool,
    pub cull_faces: bool,
}

impl FrameRenderer {
    /// Depth testing and back-face culling, for closed 3D meshes.
    pub fn solid() -> Self {
        Self {
            depth_test: true,
            cull_faces: true,
        }
    }

    /// Enable the requested capabilities and draw every index of `handle`.
    pub fn render(&self, ctx: &mut dyn GraphicsContext, handle: &RenderHandle) {
        if self.depth_test {
            ctx.enable(Capability::DepthTest);
        }
        if self.cull_faces {
            ctx.enable(Capability::CullFace);
        }
        draw(ctx, handle, handle.index_count);
    }
}
