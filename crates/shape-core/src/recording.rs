//! In-memory [`GraphicsContext`] that records every call.
//!
//! Mirrors the parts of the GL state machine the demos rely on: buffer
//! contents, per-VAO attribute tables and element buffers, global uniform
//! binding points, and the currently selected objects. Used by tests and by
//! anything that wants to inspect a scene without a GPU.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::bail;

use crate::context::{
    BufferId, BufferTarget, Capability, GraphicsContext, ProgramId, ShaderSource, VertexArrayId,
    VertexAttribute,
};

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateProgram(ProgramId),
    CreateBuffer {
        id: BufferId,
        target: BufferTarget,
        size: usize,
    },
    CreateVertexArray(VertexArrayId),
    BindVertexArray(Option<VertexArrayId>),
    BindBuffer {
        target: BufferTarget,
        buffer: Option<BufferId>,
    },
    BindUniformBlock {
        binding: u32,
        buffer: BufferId,
    },
    VertexAttribute(VertexAttribute),
    SetClearColor([f32; 4]),
    SetViewport(u32, u32),
    UseProgram(ProgramId),
    Enable(Capability),
    Clear,
    DrawIndexedTriangles {
        vao: Option<VertexArrayId>,
        count: usize,
    },
}

/// Buffer object state.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBuffer {
    pub target: BufferTarget,
    pub data: Vec<u8>,
}

/// State captured by a vertex array object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexArrayState {
    /// Enabled attributes keyed by location, with the array buffer they read.
    pub attributes: BTreeMap<u32, (VertexAttribute, BufferId)>,
    pub element_buffer: Option<BufferId>,
}

#[derive(Debug, Default)]
pub struct RecordingContext {
    size: (u32, u32),
    fail_programs: bool,
    next_id: u32,

    pub commands: Vec<Command>,
    pub buffers: BTreeMap<BufferId, RecordedBuffer>,
    pub vertex_arrays: BTreeMap<VertexArrayId, VertexArrayState>,
    pub programs: Vec<(ProgramId, Vec<ShaderSource>)>,

    // Current selection.
    pub bound_vertex_array: Option<VertexArrayId>,
    pub bound_array_buffer: Option<BufferId>,
    pub bound_uniform_buffer: Option<BufferId>,
    pub uniform_bindings: BTreeMap<u32, BufferId>,
    pub current_program: Option<ProgramId>,
    pub viewport: Option<(u32, u32)>,
    pub clear_color: Option<[f32; 4]>,
    pub enabled: BTreeSet<Capability>,
}

impl RecordingContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Default::default()
        }
    }

    /// Make every subsequent [`GraphicsContext::create_program`] call fail.
    pub fn failing_programs(mut self) -> Self {
        self.fail_programs = true;
        self
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Bytes uploaded to `id`, if it exists.
    pub fn buffer_data(&self, id: BufferId) -> Option<&[u8]> {
        self.buffers.get(&id).map(|b| b.data.as_slice())
    }

    pub fn vertex_array(&self, id: VertexArrayId) -> Option<&VertexArrayState> {
        self.vertex_arrays.get(&id)
    }

    /// Index counts of every recorded draw call, in order.
    pub fn draw_calls(&self) -> Vec<usize> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::DrawIndexedTriangles { count, .. } => Some(*count),
                _ => None,
            })
            .collect()
    }

    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GraphicsContext for RecordingContext {
    fn create_program(&mut self, sources: &[ShaderSource]) -> anyhow::Result<ProgramId> {
        if self.fail_programs {
            bail!("program creation disabled on this recording context");
        }
        let id = ProgramId(self.alloc_id());
        self.programs.push((id, sources.to_vec()));
        self.commands.push(Command::CreateProgram(id));
        Ok(id)
    }

    fn frame_buffer_size(&self) -> (u32, u32) {
        self.size
    }

    fn create_buffer(&mut self, target: BufferTarget, data: &[u8]) -> BufferId {
        let id = BufferId(self.alloc_id());
        self.buffers.insert(
            id,
            RecordedBuffer {
                target,
                data: data.to_vec(),
            },
        );
        self.commands.push(Command::CreateBuffer {
            id,
            target,
            size: data.len(),
        });
        id
    }

    fn create_vertex_array(&mut self) -> VertexArrayId {
        let id = VertexArrayId(self.alloc_id());
        self.vertex_arrays.insert(id, VertexArrayState::default());
        self.commands.push(Command::CreateVertexArray(id));
        id
    }

    fn bind_vertex_array(&mut self, vao: Option<VertexArrayId>) {
        self.bound_vertex_array = vao;
        self.commands.push(Command::BindVertexArray(vao));
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>) {
        match target {
            BufferTarget::Array => self.bound_array_buffer = buffer,
            BufferTarget::Uniform => self.bound_uniform_buffer = buffer,
            // Element array bindings live in the VAO; without one bound they
            // are dropped, as in a core profile context.
            BufferTarget::ElementArray => {
                if let Some(vao) = self.bound_vertex_array {
                    if let Some(state) = self.vertex_arrays.get_mut(&vao) {
                        state.element_buffer = buffer;
                    }
                }
            }
        }
        self.commands.push(Command::BindBuffer { target, buffer });
    }

    fn bind_uniform_block(&mut self, binding: u32, buffer: BufferId) {
        self.uniform_bindings.insert(binding, buffer);
        self.commands
            .push(Command::BindUniformBlock { binding, buffer });
    }

    fn vertex_attribute(&mut self, attribute: &VertexAttribute) {
        if let (Some(vao), Some(buffer)) = (self.bound_vertex_array, self.bound_array_buffer) {
            if let Some(state) = self.vertex_arrays.get_mut(&vao) {
                state
                    .attributes
                    .insert(attribute.location, (*attribute, buffer));
            }
        }
        self.commands.push(Command::VertexAttribute(*attribute));
    }

    fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = Some(color);
        self.commands.push(Command::SetClearColor(color));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
        self.commands.push(Command::SetViewport(width, height));
    }

    fn use_program(&mut self, program: ProgramId) {
        self.current_program = Some(program);
        self.commands.push(Command::UseProgram(program));
    }

    fn enable(&mut self, capability: Capability) {
        self.enabled.insert(capability);
        self.commands.push(Command::Enable(capability));
    }

    fn clear(&mut self) {
        self.commands.push(Command::Clear);
    }

    fn draw_indexed_triangles(&mut self, count: usize) {
        self.commands.push(Command::DrawIndexedTriangles {
            vao: self.bound_vertex_array,
            count,
        });
    }
}
