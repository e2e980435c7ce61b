//! The [`GraphicsContext`] trait: an explicit stand-in for OpenGL's global
//! state machine.
//!
//! Scene setup and frame rendering only ever talk to the GPU through this
//! trait. The `shape-gl` crate implements it on top of a live GL context;
//! [`RecordingContext`](crate::recording::RecordingContext) implements it in
//! memory so buffer construction can be tested without a GPU.

use std::path::PathBuf;

/// Handle to a GPU buffer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u32);

/// Handle to a vertex array object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexArrayId(pub u32);

/// Handle to a linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramId(pub u32);

/// Buffer binding targets used by the demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data (`GL_ARRAY_BUFFER`).
    Array,
    /// Index data (`GL_ELEMENT_ARRAY_BUFFER`). Captured by the bound VAO.
    ElementArray,
    /// Uniform block storage (`GL_UNIFORM_BUFFER`).
    Uniform,
}

/// Shader stages accepted by [`GraphicsContext::create_program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// One stage of a program: which stage and where its source lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub path: PathBuf,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, path: impl Into<PathBuf>) -> Self {
        Self {
            stage,
            path: path.into(),
        }
    }
}

/// Server-side capabilities toggled with `glEnable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    DepthTest,
    CullFace,
}

/// Layout of a single float vertex attribute inside an interleaved buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute location in the vertex shader.
    pub location: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Distance in bytes between consecutive vertices.
    pub stride: usize,
    /// Byte offset of the first component inside a vertex.
    pub offset: usize,
}

/// Explicit graphics context.
///
/// Bind calls change the context's *current selection* (bound VAO, bound
/// buffers, active program) exactly like their GL counterparts, so callers
/// must respect the same ordering rules: attribute pointers and the element
/// buffer are recorded into whichever VAO is bound at the time.
pub trait GraphicsContext {
    /// Compile and link a program from per-stage source files.
    ///
    /// Failure is fatal to the demos; the error carries the compiler or
    /// linker log.
    fn create_program(&mut self, sources: &[ShaderSource]) -> anyhow::Result<ProgramId>;

    /// Size of the default framebuffer in pixels.
    fn frame_buffer_size(&self) -> (u32, u32);

    /// Allocate a buffer on `target` and upload `data` into it.
    ///
    /// The buffer is left unbound from `target` afterwards.
    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> BufferId;

    fn create_vertex_array(&mut self) -> VertexArrayId;

    /// Bind `vao`, or unbind with `None`.
    fn bind_vertex_array(&mut self, vao: Option<VertexArrayId>);

    /// Bind `buffer` to `target`, or unbind with `None`.
    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>);

    /// Attach a uniform buffer to an indexed uniform binding point.
    fn bind_uniform_block(&mut self, binding: u32, buffer: BufferId);

    /// Enable `attribute` and point it at the bound array buffer.
    fn vertex_attribute(&mut self, attribute: &VertexAttribute);

    fn set_clear_color(&mut self, color: [f32; 4]);

    fn set_viewport(&mut self, width: u32, height: u32);

    fn use_program(&mut self, program: ProgramId);

    fn enable(&mut self, capability: Capability);

    /// Clear the color and depth buffers.
    fn clear(&mut self);

    /// Draw `count` `u16` indices from the bound element buffer as triangles.
    fn draw_indexed_triangles(&mut self, count: usize);
}
