use shape_uniforms::UniformsDemo;

fn main() {
    shape_gl::logging::init();

    let config = shape_gl::HostConfig::from_env("Uniforms");
    if let Err(err) = shape_gl::run(config, UniformsDemo::default()) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}
