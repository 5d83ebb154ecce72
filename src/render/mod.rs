//! Ray tracing and animation playback.

mod driver;
mod interpolate;
mod sampler;
mod shade;
mod trace;

pub use self::driver::{render_animation, segment_schedule, Observer};
pub use self::interpolate::{check_pairing, interpolate_frames, InterpolationError};
pub use self::sampler::{quantize, render_frame, BAND_ROWS};
pub use self::shade::{any_intersection, blinn_phong, closest_intersection};
pub use self::trace::trace;

use crate::output::OutputError;

/// Reflection depth used for every primary ray, whatever the scene asks for.
pub const TRACE_DEPTH: u32 = 64;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("animation has no keyframes")]
    NoKeyframes,
    #[error("cannot interpolate keyframe {start} into keyframe {end}")]
    Interpolation {
        start: usize,
        end: usize,
        source: InterpolationError,
    },
    #[error(transparent)]
    Output(#[from] OutputError),
}
