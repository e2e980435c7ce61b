//! One-time loading of OpenGL function pointers.

use std::sync::Once;

static GL_INIT_ONCE: Once = Once::new();

/// Load GL function pointers for the current context.
///
/// Pointers are resolved exactly once via `gl_loader`; later calls are
/// no-ops. A context must be current on the calling thread.
pub(crate) fn load_gl() {
    GL_INIT_ONCE.call_once(|| {
        gl_loader::init_gl();
        gl::load_with(|s| gl_loader::get_proc_address(s).cast());
        tracing::debug!("loaded OpenGL function pointers");
    });
}
