//! Window configuration for the host.

use std::str::FromStr;

use tracing::warn;

pub const WIDTH_VAR: &str = "SHAPES_WIDTH";
pub const HEIGHT_VAR: &str = "SHAPES_HEIGHT";
pub const DEBUG_VAR: &str = "SHAPES_DEBUG";

/// Settings for the window and GL context created by [`crate::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Check `glGetError` after every call.
    pub debug: bool,
}

impl HostConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            width: 650,
            height: 480,
            title: title.into(),
            debug: false,
        }
    }

    /// Defaults overridden by `SHAPES_WIDTH`, `SHAPES_HEIGHT` and
    /// `SHAPES_DEBUG`.
    pub fn from_env(title: impl Into<String>) -> Self {
        Self::from_lookup(title, |key| std::env::var(key).ok())
    }

    /// Like [`HostConfig::from_env`] with a custom variable source.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_lookup(title: impl Into<String>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new(title);
        if let Some(width) = parse_var::<u32>(&lookup, WIDTH_VAR).filter(|&w| w > 0) {
            config.width = width;
        }
        if let Some(height) = parse_var::<u32>(&lookup, HEIGHT_VAR).filter(|&h| h > 0) {
            config.height = height;
        }
        if let Some(value) = lookup(DEBUG_VAR) {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.debug = true,
                "0" | "false" | "no" | "off" | "" => config.debug = false,
                other => warn!(var = DEBUG_VAR, value = other, "ignoring unrecognised flag"),
            }
        }
        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = key, value = raw.as_str(), "ignoring unparsable value");
            None
        }
    }
}
