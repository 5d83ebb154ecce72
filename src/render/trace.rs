use crate::{
    ray::Ray,
    render::shade::{blinn_phong, closest_intersection},
    scene::Frame,
    vec3::Vec3,
};

/// Radiance arriving along `ray`.
///
/// Recursion stops at `depth == 0` (black) or when the ray escapes the scene
/// (background). Otherwise the mirror bounce is weighted by the surface's
/// specular color and direct lighting is seen from the camera position.
pub fn trace(ray: &Ray<f64>, frame: &Frame, depth: u32) -> Vec3<f64> {
    if depth == 0 {
        return Vec3::ZERO;
    }

    let hit = match closest_intersection(ray, frame) {
        Some(hit) => hit,
        None => return frame.background,
    };

    let reflected = Ray::new(hit.point, ray.direction().reflect(&hit.normal));
    let reflected_color = trace(&reflected, frame, depth - 1);

    reflected_color * hit.material.specular + blinn_phong(frame.camera.position, &hit, frame)
}
