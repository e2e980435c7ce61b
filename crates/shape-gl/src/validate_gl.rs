//! Validate the state of the OpenGL context.

use anyhow::{bail, Result};
use gl::types::GLenum;

/// Name of a `glGetError` code.
pub fn error_name(code: GLenum) -> &'static str {
    match code {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

/// Drain the GL error queue, failing with every pending error attributed to
/// `call`.
///
/// # Safety
///
/// Must be called with a valid OpenGL context current.
pub unsafe fn check_error(call: &str) -> Result<()> {
    let mut errors = Vec::new();
    loop {
        let code = gl::GetError();
        if code == gl::NO_ERROR {
            break;
        }
        errors.push(error_name(code));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        bail!("{call} raised {}", errors.join(", "))
    }
}

/// Check that the viewport covers `(0, 0, width, height)`.
///
/// # Safety
///
/// Must be called with a valid OpenGL context current.
pub unsafe fn validate_viewport(width: u32, height: u32) -> Result<()> {
    let mut dims: [i32; 4] = [0; 4];
    gl::GetIntegerv(gl::VIEWPORT, dims.as_mut_ptr());

    let expected = [0, 0, width as i32, height as i32];
    if dims != expected {
        bail!("VIEWPORT is {dims:?}, expected {expected:?}");
    }
    Ok(())
}
