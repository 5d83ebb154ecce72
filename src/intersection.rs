use crate::{material::Material, vec3::Vec3};

/// Where a ray meets geometry.
///
/// The material is borrowed from the hit model for as long as shading needs it.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub material: &'a Material,
    pub point: Vec3<f64>,
    pub normal: Vec3<f64>,
    pub t: f64,
}

impl<'a> Intersection<'a> {
    pub fn new(material: &'a Material, t: f64, point: Vec3<f64>, normal: Vec3<f64>) -> Self {
        Self {
            material,
            point,
            normal,
            t,
        }
    }
}
