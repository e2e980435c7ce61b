//! Shader compilation and program linking.

use std::ffi::CString;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use gl::types::{GLchar, GLenum, GLint, GLuint};
use shape_core::context::{ShaderSource, ShaderStage};
use tracing::debug;

/// Path of a shader file inside a demo's `shaders/` directory.
///
/// Demos pass `env!("CARGO_MANIFEST_DIR")` as `project_dir`.
pub fn shader_path(project_dir: impl AsRef<Path>, file: &str) -> PathBuf {
    project_dir.as_ref().join("shaders").join(file)
}

fn stage_enum(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

/// Read, compile and link every stage into one program.
///
/// # Safety
///
/// Must be called with a valid OpenGL context current.
pub unsafe fn create_program(sources: &[ShaderSource]) -> Result<GLuint> {
    if sources.is_empty() {
        bail!("a program needs at least one shader stage");
    }

    let mut shaders = Vec::with_capacity(sources.len());
    for source in sources {
        let compiled = std::fs::read_to_string(&source.path)
            .with_context(|| format!("failed to read shader {}", source.path.display()))
            .and_then(|src| {
                compile(stage_enum(source.stage), &src)
                    .with_context(|| format!("failed to compile {}", source.path.display()))
            });
        match compiled {
            Ok(shader) => shaders.push(shader),
            Err(err) => {
                delete_shaders(&shaders);
                return Err(err);
            }
        }
    }

    let program = link(&shaders);
    // Linked programs keep their own copy of the stages.
    delete_shaders(&shaders);
    let program = program?;

    debug!(program, stages = sources.len(), "linked shader program");
    Ok(program)
}

unsafe fn delete_shaders(shaders: &[GLuint]) {
    for &shader in shaders {
        gl::DeleteShader(shader);
    }
}

unsafe fn compile(stage: GLenum, src: &str) -> Result<GLuint> {
    let c_str = CString::new(src.as_bytes()).context("shader source contains a NUL byte")?;

    let shader = gl::CreateShader(stage);
    gl::ShaderSource(shader, 1, &c_str.as_ptr(), std::ptr::null());
    gl::CompileShader(shader);

    let mut status = GLint::from(gl::FALSE);
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

    if status != GLint::from(gl::TRUE) {
        let mut len = 0;
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        gl::GetShaderInfoLog(
            shader,
            len,
            std::ptr::null_mut(),
            buf.as_mut_ptr() as *mut GLchar,
        );
        gl::DeleteShader(shader);
        bail!("{}", info_log(&buf));
    }

    Ok(shader)
}

unsafe fn link(shaders: &[GLuint]) -> Result<GLuint> {
    let program = gl::CreateProgram();
    for &shader in shaders {
        gl::AttachShader(program, shader);
    }
    gl::LinkProgram(program);

    let mut status = GLint::from(gl::FALSE);
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

    if status != GLint::from(gl::TRUE) {
        let mut len: GLint = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        gl::GetProgramInfoLog(
            program,
            len,
            std::ptr::null_mut(),
            buf.as_mut_ptr() as *mut GLchar,
        );
        gl::DeleteProgram(program);
        bail!("failed to link program: {}", info_log(&buf));
    }

    for &shader in shaders {
        gl::DetachShader(program, shader);
    }
    Ok(program)
}

/// Info log text without its trailing NUL.
fn info_log(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).trim_end().to_string()
}
