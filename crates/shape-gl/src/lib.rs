//! OpenGL host for the uniform-shapes demos.
//!
//! Provides the collaborators [`shape_core`] leaves abstract:
//!
//! - [`GlContext`] implements [`shape_core::GraphicsContext`] with raw `gl`
//!   calls on the current context.
//! - [`program::create_program`] reads, compiles and links GLSL stages.
//! - [`run`] opens a glium/winit window and drives an
//!   [`shape_core::Application`] through `init` and `frame`.
//! - [`logging::init`] installs the `tracing` subscriber the binaries use.
//!
//! ### Warning
//!
//! [`GlContext`] talks to whatever context is current on the calling thread.
//! Creating one without a current context is undefined behavior.

pub mod config;
pub mod context;
pub mod glsl;
mod host;
mod loader;
pub mod logging;
pub mod program;
pub mod validate_gl;

pub use config::HostConfig;
pub use context::GlContext;
pub use host::run;
pub use program::shader_path;
