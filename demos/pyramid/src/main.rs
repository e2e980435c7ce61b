use shape_pyramid::PyramidDemo;

fn main() {
    shape_gl::logging::init();

    let config = shape_gl::HostConfig::from_env("Pyramid");
    if let Err(err) = shape_gl::run(config, PyramidDemo::default()) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}
