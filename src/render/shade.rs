//! Visibility queries and Blinn-Phong lighting over a frame's objects.
//!
//! Every query is a linear scan; there is no acceleration structure.

use crate::{intersection::Intersection, ray::Ray, scene::Frame, vec3::Vec3};

/// The hit with the smallest `t`; ties keep the earlier object.
pub fn closest_intersection<'a>(ray: &Ray<f64>, frame: &'a Frame) -> Option<Intersection<'a>> {
    let mut t = f64::INFINITY;
    let mut closest = None;

    for model in &frame.objects {
        if let Some(intersection) = model.intersection(ray) {
            if intersection.t < t {
                t = intersection.t;
                closest = Some(intersection);
            }
        }
    }

    closest
}

/// The first hit in object order, nearest or not.
pub fn any_intersection<'a>(ray: &Ray<f64>, frame: &'a Frame) -> Option<Intersection<'a>> {
    frame.objects.values().iter().find_map(|model| model.intersection(ray))
}

/// Direct lighting at `hit` as seen from `eye`, summed over unoccluded lights.
///
/// A light counts as occluded when anything lies along the shadow ray, even
/// past the light itself.
pub fn blinn_phong(eye: Vec3<f64>, hit: &Intersection, frame: &Frame) -> Vec3<f64> {
    let view = (eye - hit.point).unit();
    let material = hit.material;

    let mut color = Vec3::ZERO;
    for light in &frame.lights {
        let to_light = (light.position - hit.point).unit();

        // Shadows.
        if any_intersection(&Ray::new(hit.point, to_light), frame).is_some() {
            continue;
        }

        let lambert = hit.normal.dot(&to_light).max(0.0);
        let diffuse = (material.diffuse * light.diffuse).scale(lambert);

        let halfway = (view + to_light).unit();
        let highlight = halfway.dot(&hit.normal).max(0.0).powf(4.0 * material.shininess);
        let specular = (material.specular * light.specular).scale(highlight);

        color += diffuse + specular;
    }

    color
}
