use crate::geometry::{Geometry, Hit, EPSILON};
use crate::{lerp::Lerp, ray::Ray, vec3::Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3<f64>,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Vec3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Sphere::new(Vec3::ZERO, 1.0)
    }
}

impl Geometry for Sphere {
    fn intersection(&self, ray: &Ray<f64>) -> Option<Hit> {
        let oc = ray.origin() - self.center;

        // The direction is unit length, so the quadratic's `a` term is 1.
        let b = 2.0 * ray.direction().dot(&oc);
        let c = oc.dot(&oc) - self.radius * self.radius;

        // Tangent rays are treated as misses.
        let discriminant = b * b - 4.0 * c;
        if discriminant <= EPSILON {
            return None;
        }

        let sqrt = discriminant.sqrt();
        let mut near = (-b - sqrt) / 2.0;
        let mut far = (-b + sqrt) / 2.0;
        if near > far {
            std::mem::swap(&mut near, &mut far);
        }

        let t = if near < -EPSILON && far < EPSILON {
            return None;
        } else if near < 0.0 {
            // Origin inside the sphere.
            far
        } else {
            near
        };

        let point = ray.offset(t);
        let normal = (point - self.center).unit();

        Some(Hit::new(t, point, normal))
    }
}

impl Lerp for Sphere {
    fn lerp(a: &Sphere, b: &Sphere, alpha: f64) -> Sphere {
        Sphere {
            center: Vec3::lerp(&a.center, &b.center, alpha),
            radius: f64::lerp(&a.radius, &b.radius, alpha),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 2.0)
    }

    #[test]
    fn outside_ray_hits_near_surface() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere().intersection(&ray).unwrap();

        assert_relative_eq!(8.0, hit.t, epsilon = 1e-9);
        assert_relative_eq!(Vec3::new(0.0, 0.0, 1.0), hit.normal, epsilon = 1e-9);
    }

    #[test]
    fn inside_ray_hits_far_surface() {
        let ray = Ray::new(Vec3::new(0.5, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        let hit = sphere().intersection(&ray).unwrap();

        assert!(hit.t >= 0.0);
        assert_relative_eq!(1.5, hit.t, epsilon = 1e-9);
        assert_relative_eq!(Vec3::new(2.0, 0.0, 0.0), hit.point, epsilon = 1e-9);
    }

    #[test]
    fn sphere_behind_origin_is_missed() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 1.0));

        assert!(sphere().intersection(&ray).is_none());
    }

    #[test]
    fn tangent_ray_is_a_miss() {
        let ray = Ray::new(Vec3::new(2.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));

        assert!(sphere().intersection(&ray).is_none());
    }

    #[test]
    fn lerp_of_identical_spheres_is_identity() {
        let s = Sphere::new(Vec3::new(0.3, -1.7, 4.1), 0.7);

        for &alpha in &[0.0, 0.25, 0.5, 0.9, 1.0] {
            let l = Sphere::lerp(&s, &s, alpha);
            assert_relative_eq!(s.center, l.center, epsilon = 1e-12);
            assert_relative_eq!(s.radius, l.radius, epsilon = 1e-12);
        }
    }
}
