//! In-memory scene graph and the readers that build it.

use std::fs;
use std::io;
use std::path::Path;

use crate::{camera::Camera, geometry::Model, light::Light, vec3::Vec3};

mod builder;
pub mod json;
mod property;
mod registry;
pub mod text;

pub use self::builder::AnimationBuilder;
pub use self::property::{Properties, PropertyError};
pub use self::registry::Registry;

/// One time-sample of the scene.
///
/// Renderers treat a frame as an immutable snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub objects: Registry<Model>,
    pub lights: Registry<Light>,
    pub background: Vec3<f64>,
    pub camera: Camera,
    pub camera_name: String,
    /// Seconds until the following keyframe.
    pub time_offset: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub keyframes: Vec<Frame>,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    /// Configured reflection depth. Reported, but the tracer always
    /// recurses to `render::TRACE_DEPTH`.
    pub max_depth: u32,
    /// Sub-samples per axis; each pixel averages `samples * samples` rays.
    pub samples: u32,
    pub looping: bool,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            keyframes: Vec::new(),
            fps: 24,
            width: 720,
            height: 480,
            max_depth: 4,
            samples: 3,
            looping: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to read scene")]
    Io(#[from] io::Error),

    #[error("unexpected end of scene file")]
    UnexpectedEof,

    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: expected `{expected}`, found `{found}`")]
    Unexpected {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("invalid property on line {line}")]
    Property { line: usize, source: PropertyError },

    #[error("invalid JSON scene")]
    Json(#[from] serde_json::Error),

    #[error("invalid property on `{name}`")]
    EntityProperty { name: String, source: PropertyError },

    #[error("object `{name}` has unknown type `{kind}`")]
    UnknownShape { name: String, kind: String },

    #[error("resolution {width}x{height} has no pixels")]
    InvalidResolution { width: u32, height: u32 },

    #[error("keyframe {keyframe} lasts {offset} seconds")]
    InvalidOffset { keyframe: usize, offset: f64 },
}

/// Reads a scene file, choosing the reader from the extension:
/// `.json` documents go through serde, everything else is the text format.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Animation, SceneError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    log::info!("Parsing scene {}", path.display());
    let animation = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => json::parse(&content)?,
        _ => text::parse(&content)?,
    };
    log::info!(
        "Parsed {} keyframe(s), {}x{} at {} fps",
        animation.keyframes.len(),
        animation.width,
        animation.height,
        animation.fps
    );

    Ok(animation)
}
