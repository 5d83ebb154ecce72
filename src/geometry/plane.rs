use crate::geometry::{Geometry, Hit, EPSILON};
use crate::{lerp::Lerp, ray::Ray, vec3::Vec3};

/// An infinite plane through `point`, facing along its unit normal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3<f64>,
    normal: Vec3<f64>,
}

impl Plane {
    pub fn new(point: Vec3<f64>, normal: Vec3<f64>) -> Self {
        Self {
            point,
            normal: normal.unit(),
        }
    }

    /// Always unit length.
    #[inline]
    pub fn normal(&self) -> Vec3<f64> {
        self.normal
    }

    pub fn set_normal(&mut self, normal: Vec3<f64>) {
        self.normal = normal.unit();
    }
}

impl Default for Plane {
    fn default() -> Self {
        Plane::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0))
    }
}

impl Geometry for Plane {
    fn intersection(&self, ray: &Ray<f64>) -> Option<Hit> {
        let denominator = self.normal.dot(ray.direction());
        if denominator.abs() <= EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(&self.normal) / denominator;
        if t <= EPSILON {
            return None;
        }

        Some(Hit::new(t, ray.offset(t), self.normal))
    }
}

impl Lerp for Plane {
    /// Blends point and normal, renormalizing the result. When the blended
    /// normal collapses (opposite normals half way through), `a`'s is kept.
    fn lerp(a: &Plane, b: &Plane, alpha: f64) -> Plane {
        let normal = Vec3::lerp(&a.normal, &b.normal, alpha);
        let normal = if normal.len() <= EPSILON { a.normal } else { normal.unit() };

        Plane {
            point: Vec3::lerp(&a.point, &b.point, alpha),
            normal,
        }
    }
}
