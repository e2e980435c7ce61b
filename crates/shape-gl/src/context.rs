//! [`GlContext`]: the OpenGL implementation of [`GraphicsContext`].

use gl::types::{GLenum, GLsizei, GLsizeiptr, GLuint};
use shape_core::context::{
    BufferId, BufferTarget, Capability, GraphicsContext, ProgramId, ShaderSource, VertexArrayId,
    VertexAttribute,
};
use tracing::{debug, warn};

use crate::{loader, program, validate_gl};

/// Graphics context backed by the GL context current on this thread.
///
/// With `debug` on, every GL call is followed by a `glGetError` check whose
/// failures are logged.
#[derive(Debug)]
pub struct GlContext {
    size: (u32, u32),
    debug: bool,
}

impl GlContext {
    /// Wrap the current GL context.
    ///
    /// GL function pointers are loaded on first use.
    pub fn new(size: (u32, u32), debug: bool) -> Self {
        loader::load_gl();
        Self { size, debug }
    }

    /// Record a new framebuffer size; the viewport is left alone.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn check(&self, call: &str) {
        if !self.debug {
            return;
        }
        if let Err(err) = unsafe { validate_gl::check_error(call) } {
            warn!("{err}");
        }
    }
}

fn target_enum(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Array => gl::ARRAY_BUFFER,
        BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        BufferTarget::Uniform => gl::UNIFORM_BUFFER,
    }
}

fn capability_enum(capability: Capability) -> GLenum {
    match capability {
        Capability::DepthTest => gl::DEPTH_TEST,
        Capability::CullFace => gl::CULL_FACE,
    }
}

impl GraphicsContext for GlContext {
    fn create_program(&mut self, sources: &[ShaderSource]) -> anyhow::Result<ProgramId> {
        let id = unsafe { program::create_program(sources)? };
        self.check("glLinkProgram");
        Ok(ProgramId(id))
    }

    fn frame_buffer_size(&self) -> (u32, u32) {
        self.size
    }

    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> BufferId {
        let target = target_enum(target);
        let mut id: GLuint = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
            gl::BindBuffer(target, id);
            self.check("glBindBuffer");
            let ptr = if data.is_empty() {
                std::ptr::null()
            } else {
                data.as_ptr().cast()
            };
            gl::BufferData(target, data.len() as GLsizeiptr, ptr, gl::STATIC_DRAW);
            self.check("glBufferData");
            gl::BindBuffer(target, 0);
        }
        debug!(id, target, bytes = data.len(), "created buffer");
        BufferId(id)
    }

    fn create_vertex_array(&mut self) -> VertexArrayId {
        let mut id: GLuint = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
        }
        self.check("glGenVertexArrays");
        VertexArrayId(id)
    }

    fn bind_vertex_array(&mut self, vao: Option<VertexArrayId>) {
        unsafe {
            gl::BindVertexArray(vao.map_or(0, |v| v.0));
        }
        self.check("glBindVertexArray");
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>) {
        unsafe {
            gl::BindBuffer(target_enum(target), buffer.map_or(0, |b| b.0));
        }
        self.check("glBindBuffer");
    }

    fn bind_uniform_block(&mut self, binding: u32, buffer: BufferId) {
        unsafe {
            gl::BindBufferBase(gl::UNIFORM_BUFFER, binding, buffer.0);
        }
        self.check("glBindBufferBase");
    }

    fn vertex_attribute(&mut self, attribute: &VertexAttribute) {
        unsafe {
            gl::EnableVertexAttribArray(attribute.location);
            gl::VertexAttribPointer(
                attribute.location,
                attribute.components,
                gl::FLOAT,
                gl::FALSE,
                attribute.stride as GLsizei,
                attribute.offset as *const std::ffi::c_void,
            );
        }
        self.check("glVertexAttribPointer");
    }

    fn set_clear_color(&mut self, [r, g, b, a]: [f32; 4]) {
        unsafe {
            gl::ClearColor(r, g, b, a);
        }
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as GLsizei, height as GLsizei);
            if self.debug {
                if let Err(err) = validate_gl::validate_viewport(width, height) {
                    warn!("{err}");
                }
            }
        }
    }

    fn use_program(&mut self, program: ProgramId) {
        unsafe {
            gl::UseProgram(program.0);
        }
        self.check("glUseProgram");
    }

    fn enable(&mut self, capability: Capability) {
        unsafe {
            gl::Enable(capability_enum(capability));
        }
    }

    fn clear(&mut self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    fn draw_indexed_triangles(&mut self, count: usize) {
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                count as GLsizei,
                gl::UNSIGNED_SHORT,
                std::ptr::null(),
            );
        }
        self.check("glDrawElements");
    }
}
