use crate::{lerp::Lerp, vec3::Vec3};

/// Surface response shared by every shape. Colors are linear RGB.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Material {
    pub diffuse: Vec3<f64>,
    /// Also scales the reflected contribution.
    pub specular: Vec3<f64>,
    pub shininess: f64,
}

impl Lerp for Material {
    fn lerp(a: &Material, b: &Material, alpha: f64) -> Material {
        Material {
            diffuse: Vec3::lerp(&a.diffuse, &b.diffuse, alpha),
            specular: Vec3::lerp(&a.specular, &b.specular, alpha),
            shininess: f64::lerp(&a.shininess, &b.shininess, alpha),
        }
    }
}
