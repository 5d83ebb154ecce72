use log::{debug, warn};

use crate::{
    camera::Camera,
    geometry::{Model, ShapeKind},
    light::Light,
    material::Material,
    scene::{Animation, Frame, SceneError},
    vec3::Vec3,
};

/// Assembles an [`Animation`] with copy-forward keyframes.
///
/// Every new keyframe starts as a clone of the previous one, so entities a
/// keyframe does not mention keep their last state and entities it does
/// mention are patched in place, keeping their position in the frame.
#[derive(Debug, Default)]
pub struct AnimationBuilder {
    animation: Animation,
    current: Option<Frame>,
}

impl AnimationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(&mut self, width: u32, height: u32) -> &mut Self {
        self.animation.width = width;
        self.animation.height = height;
        self
    }

    pub fn fps(&mut self, fps: u32) -> &mut Self {
        self.animation.fps = fps;
        self
    }

    pub fn max_depth(&mut self, depth: u32) -> &mut Self {
        self.animation.max_depth = depth;
        self
    }

    /// Sets the total number of rays per pixel. The sampling grid side is
    /// `floor(sqrt(rays))`, never less than one.
    pub fn samples(&mut self, rays: f64) -> &mut Self {
        let side = rays.max(0.0).sqrt().floor() as u32;
        if side == 0 {
            warn!("{} samples per pixel is too few, using 1", rays);
        }
        self.animation.samples = side.max(1);
        self
    }

    pub fn looping(&mut self, looping: bool) -> &mut Self {
        self.animation.looping = looping;
        self
    }

    /// Starts a keyframe lasting `offset` seconds.
    pub fn keyframe(&mut self, offset: f64) -> &mut Self {
        let mut next = match self.current.take() {
            Some(previous) => {
                let next = previous.clone();
                self.animation.keyframes.push(previous);
                next
            }
            None => Frame::default(),
        };

        debug!("Keyframe {} ({}s)", self.animation.keyframes.len(), offset);
        next.time_offset = offset;
        self.current = Some(next);
        self
    }

    fn frame(&mut self) -> &mut Frame {
        self.current.get_or_insert_with(Frame::default)
    }

    pub fn background(&mut self, color: Vec3<f64>) -> &mut Self {
        self.frame().background = color;
        self
    }

    /// The object called `name`, created with defaults on first mention.
    ///
    /// Re-declaring an object as a different shape replaces its geometry with
    /// the new shape's defaults but keeps its material.
    pub fn object(&mut self, kind: ShapeKind, name: &str) -> &mut Model {
        debug!("Object {} `{}`", kind, name);
        let model = self
            .frame()
            .objects
            .get_or_insert_with(name, || Model::new(kind.default_shape(), Material::default()));

        if model.shape.kind() != kind {
            warn!("`{}` changes shape from {} to {}", name, model.shape.kind(), kind);
            *model = Model::new(kind.default_shape(), model.material);
        }

        model
    }

    pub fn light(&mut self, name: &str) -> &mut Light {
        debug!("Light `{}`", name);
        self.frame().lights.get_or_insert_with(name, Light::default)
    }

    pub fn camera(&mut self, name: &str) -> &mut Camera {
        debug!("Camera `{}`", name);
        let frame = self.frame();
        frame.camera_name = name.to_owned();
        &mut frame.camera
    }

    /// Finishes the animation, rejecting settings nothing can be rendered
    /// from: an empty surface or a keyframe lasting a non-finite time.
    pub fn build(mut self) -> Result<Animation, SceneError> {
        if let Some(frame) = self.current.take() {
            self.animation.keyframes.push(frame);
        }

        let (width, height) = (self.animation.width, self.animation.height);
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidResolution { width, height });
        }

        for (index, keyframe) in self.animation.keyframes.iter().enumerate() {
            if !keyframe.time_offset.is_finite() {
                return Err(SceneError::InvalidOffset {
                    keyframe: index,
                    offset: keyframe.time_offset,
                });
            }
        }

        Ok(self.animation)
    }
}
