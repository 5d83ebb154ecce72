use crate::{lerp::Lerp, vec3::Vec3};

/// A point light with separate diffuse and specular colors.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Light {
    pub position: Vec3<f64>,
    pub diffuse: Vec3<f64>,
    pub specular: Vec3<f64>,
}

impl Lerp for Light {
    fn lerp(a: &Light, b: &Light, alpha: f64) -> Light {
        Light {
            position: Vec3::lerp(&a.position, &b.position, alpha),
            diffuse: Vec3::lerp(&a.diffuse, &b.diffuse, alpha),
            specular: Vec3::lerp(&a.specular, &b.specular, alpha),
        }
    }
}
