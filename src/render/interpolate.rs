//! Blending between two keyframes.
//!
//! Objects and lights are paired by position, so both keyframes must list
//! the same entities in the same order.

use crate::{
    camera::Camera,
    geometry::{Model, ShapeKind},
    lerp::Lerp,
    light::Light,
    scene::{Frame, Registry},
    vec3::Vec3,
};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InterpolationError {
    #[error("keyframes hold {start} and {end} objects")]
    ObjectCount { start: usize, end: usize },
    #[error("keyframes hold {start} and {end} lights")]
    LightCount { start: usize, end: usize },
    #[error("{entity} #{index} is `{start}` in one keyframe and `{end}` in the next")]
    NameMismatch {
        entity: &'static str,
        index: usize,
        start: String,
        end: String,
    },
    #[error("object `{name}` is a {start} in one keyframe and a {end} in the next")]
    ShapeMismatch {
        name: String,
        start: ShapeKind,
        end: ShapeKind,
    },
}

fn check_names<T>(entity: &'static str, a: &Registry<T>, b: &Registry<T>) -> Result<(), InterpolationError> {
    let mismatch = a
        .names()
        .iter()
        .zip(b.names())
        .enumerate()
        .find(|(_, (start, end))| start != end);

    match mismatch {
        Some((index, (start, end))) => Err(InterpolationError::NameMismatch {
            entity,
            index,
            start: start.clone(),
            end: end.clone(),
        }),
        None => Ok(()),
    }
}

/// Verifies that `start` and `end` can be blended at all.
pub fn check_pairing(start: &Frame, end: &Frame) -> Result<(), InterpolationError> {
    if start.objects.len() != end.objects.len() {
        return Err(InterpolationError::ObjectCount {
            start: start.objects.len(),
            end: end.objects.len(),
        });
    }
    if start.lights.len() != end.lights.len() {
        return Err(InterpolationError::LightCount {
            start: start.lights.len(),
            end: end.lights.len(),
        });
    }

    check_names("object", &start.objects, &end.objects)?;
    check_names("light", &start.lights, &end.lights)?;

    for ((name, a), b) in start.objects.iter().zip(end.objects.values()) {
        if a.shape.kind() != b.shape.kind() {
            return Err(InterpolationError::ShapeMismatch {
                name: name.to_owned(),
                start: a.shape.kind(),
                end: b.shape.kind(),
            });
        }
    }

    Ok(())
}

/// A frame `alpha` of the way from `start` to `end`.
///
/// Names, the camera name and the time offset come from `start`.
pub fn interpolate_frames(start: &Frame, end: &Frame, alpha: f64) -> Result<Frame, InterpolationError> {
    check_pairing(start, end)?;

    let mut objects = Registry::new();
    for ((name, a), b) in start.objects.iter().zip(end.objects.values()) {
        let model = Model::interpolate(a, b, alpha).ok_or_else(|| InterpolationError::ShapeMismatch {
            name: name.to_owned(),
            start: a.shape.kind(),
            end: b.shape.kind(),
        })?;
        objects.push(name, model);
    }

    let mut lights = Registry::new();
    for ((name, a), b) in start.lights.iter().zip(end.lights.values()) {
        lights.push(name, Light::lerp(a, b, alpha));
    }

    Ok(Frame {
        objects,
        lights,
        background: Vec3::lerp(&start.background, &end.background, alpha),
        camera: Camera::lerp(&start.camera, &end.camera, alpha),
        camera_name: start.camera_name.clone(),
        time_offset: start.time_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Shape, Sphere, Triangle};
    use crate::material::Material;
    use approx::assert_relative_eq;

    fn frame(objects: Vec<(&str, Shape)>) -> Frame {
        let mut frame = Frame::default();
        for (name, shape) in objects {
            frame.objects.push(name, Model::new(shape, Material::default()));
        }
        frame
    }

    fn ball(x: f64) -> Shape {
        Shape::Sphere(Sphere::new(Vec3::new(x, 0.0, 0.0), 1.0))
    }

    #[test]
    fn endpoints_reproduce_keyframes() {
        let mut a = frame(vec![("ball", ball(0.0))]);
        a.background = Vec3::new(0.1, 0.2, 0.3);
        a.camera_name = "main".to_owned();
        a.time_offset = 2.0;
        let mut b = frame(vec![("ball", ball(4.0))]);
        b.background = Vec3::new(0.9, 0.8, 0.7);
        b.camera.fov = 30.0;

        assert_eq!(a, interpolate_frames(&a, &b, 0.0).unwrap());

        let at_end = interpolate_frames(&a, &b, 1.0).unwrap();
        assert_eq!(b.objects, at_end.objects);
        assert_eq!(b.background, at_end.background);
        assert_eq!(b.camera, at_end.camera);
        assert_eq!("main", at_end.camera_name);
        assert_eq!(2.0, at_end.time_offset);
    }

    #[test]
    fn midpoint_blends_everything() {
        let a = frame(vec![("ball", ball(0.0))]);
        let mut b = frame(vec![("ball", ball(4.0))]);
        b.background = Vec3::splat(1.0);

        let mid = interpolate_frames(&a, &b, 0.5).unwrap();

        assert_eq!(Vec3::splat(0.5), mid.background);
        match mid.objects.values()[0].shape {
            Shape::Sphere(s) => assert_relative_eq!(Vec3::new(2.0, 0.0, 0.0), s.center, epsilon = 1e-12),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn triangles_are_interpolated() {
        let a = frame(vec![("tri", Shape::Triangle(Triangle::default()))]);
        let moved = Triangle::new(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        );
        let b = frame(vec![("tri", Shape::Triangle(moved))]);

        let mid = interpolate_frames(&a, &b, 0.5).unwrap();

        match mid.objects.values()[0].shape {
            Shape::Triangle(t) => assert_relative_eq!(Vec3::new(0.0, 1.0, 1.0), t.vertices()[2], epsilon = 1e-12),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn identical_frames_are_a_fixed_point() {
        let a = frame(vec![("ball", ball(3.0)), ("tri", Shape::Triangle(Triangle::default()))]);

        assert_eq!(a, interpolate_frames(&a, &a, 0.5).unwrap());
    }

    #[test]
    fn count_mismatch_is_an_error() {
        let a = frame(vec![("ball", ball(0.0))]);
        let b = frame(vec![("ball", ball(0.0)), ("other", ball(1.0))]);

        assert_eq!(
            Err(InterpolationError::ObjectCount { start: 1, end: 2 }),
            interpolate_frames(&a, &b, 0.5)
        );
    }

    #[test]
    fn light_mismatches_are_errors() {
        let mut a = Frame::default();
        a.lights.push("key", Light::default());
        let mut b = a.clone();
        b.lights.push("fill", Light::default());
        let mut c = Frame::default();
        c.lights.push("rim", Light::default());

        assert_eq!(
            Err(InterpolationError::LightCount { start: 1, end: 2 }),
            interpolate_frames(&a, &b, 0.5)
        );
        assert_eq!(
            Err(InterpolationError::NameMismatch {
                entity: "light",
                index: 0,
                start: "key".to_owned(),
                end: "rim".to_owned(),
            }),
            check_pairing(&a, &c)
        );
    }

    #[test]
    fn shape_and_name_mismatches_are_errors() {
        let a = frame(vec![("thing", ball(0.0))]);
        let b = frame(vec![("thing", Shape::Triangle(Triangle::default()))]);
        let c = frame(vec![("other", ball(0.0))]);

        assert_eq!(
            Err(InterpolationError::ShapeMismatch {
                name: "thing".to_owned(),
                start: ShapeKind::Sphere,
                end: ShapeKind::Triangle,
            }),
            check_pairing(&a, &b)
        );
        assert!(matches!(
            check_pairing(&a, &c),
            Err(InterpolationError::NameMismatch { index: 0, .. })
        ));
    }
}
