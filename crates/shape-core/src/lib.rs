//! Core of the uniform-shapes demos.
//!
//! Everything here is independent of a live OpenGL context:
//!
//! - [`geometry`] builds interleaved vertex data and `u16` index lists.
//! - [`uniforms`] packs uniform blocks into std140 byte layouts.
//! - [`transform`] composes view, projection and model matrices.
//! - [`context`] defines [`GraphicsContext`], the explicit replacement for
//!   ambient GL state, and [`recording`] an in-memory implementation of it.
//! - [`scene`] uploads a shape into GPU objects once; [`renderer`] draws it
//!   every frame.
//! - [`app`] is the `init` / `frame` contract a host drives.

pub mod app;
pub mod context;
pub mod geometry;
pub mod recording;
pub mod renderer;
pub mod scene;
pub mod transform;
pub mod uniforms;

// Re-export primary types at crate root for convenience.
pub use app::Application;
pub use context::GraphicsContext;
pub use geometry::{Geometry, Vertex};
pub use recording::RecordingContext;
pub use renderer::FrameRenderer;
pub use scene::RenderHandle;
pub use uniforms::{MaterialUniform, PackError, Transform2d, Transform3d, UniformBlock};
