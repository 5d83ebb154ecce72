//! Keyframed ray-traced animation.
//!
//! A scene file lists keyframes; [`scene::load`] turns it into an
//! [`Animation`](scene::Animation) and [`render::render_animation`] plays it,
//! interpolating between keyframes and handing each rendered frame to an
//! [`Observer`](render::Observer).

#[macro_use]
extern crate serde_derive;

pub mod camera;
pub mod geometry;
pub mod intersection;
pub mod lerp;
pub mod light;
pub mod material;
pub mod output;
#[cfg(feature = "preview")]
pub mod preview;
pub mod ray;
pub mod render;
pub mod scene;
pub mod vec3;

pub use crate::intersection::Intersection;
