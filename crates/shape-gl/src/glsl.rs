//! GLSL version detection.

use glium::CapabilitiesSource;

/// GLSL versions the demo shaders can be written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GlslVersion {
    Glsl330,
    /// First version with `layout(binding = N)` on uniform blocks.
    Glsl420,
}

/// Highest supported version out of [`GlslVersion`], or `None` if the
/// context supports neither.
pub fn best_supported(ctx: &impl CapabilitiesSource) -> Option<GlslVersion> {
    let glsl_versions = &ctx.get_capabilities().supported_glsl_versions;
    let supports = |major, minor| {
        glsl_versions
            .iter()
            .any(|v| *v >= glium::Version(glium::Api::Gl, major, minor) && v.0 == glium::Api::Gl)
    };

    if supports(4, 2) {
        Some(GlslVersion::Glsl420)
    } else if supports(3, 3) {
        Some(GlslVersion::Glsl330)
    } else {
        None
    }
}
