use crate::geometry::{Geometry, Hit, EPSILON};
use crate::{lerp::Lerp, ray::Ray, vec3::Vec3};

/// A flat-shaded triangle.
///
/// The face normal is recomputed whenever a vertex changes, so it always
/// matches the winding of `v1 -> v2 -> v3`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    vertices: [Vec3<f64>; 3],
    normal: Vec3<f64>,
}

impl Triangle {
    pub fn new(v1: Vec3<f64>, v2: Vec3<f64>, v3: Vec3<f64>) -> Self {
        Self {
            vertices: [v1, v2, v3],
            normal: face_normal(&[v1, v2, v3]),
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec3<f64>; 3] {
        &self.vertices
    }

    #[inline]
    pub fn normal(&self) -> Vec3<f64> {
        self.normal
    }

    /// Moves vertex `index` (0, 1 or 2).
    pub fn set_vertex(&mut self, index: usize, vertex: Vec3<f64>) {
        self.vertices[index] = vertex;
        self.normal = face_normal(&self.vertices);
    }
}

fn face_normal(v: &[Vec3<f64>; 3]) -> Vec3<f64> {
    (v[1] - v[0]).cross(&(v[2] - v[0])).unit()
}

impl Default for Triangle {
    fn default() -> Self {
        Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }
}

impl Geometry for Triangle {
    fn intersection(&self, ray: &Ray<f64>) -> Option<Hit> {
        let [v1, v2, v3] = self.vertices;
        let direction = ray.direction();

        let p = v2 - v1;
        let q = v3 - v1;
        let pvec = direction.cross(&q);
        let det = pvec.dot(&p);
        if det.abs() <= EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin() - v1;
        let u = inv_det * s.dot(&pvec);
        if u < 0.0 || u > 1.0 {
            return None;
        }

        let qvec = s.cross(&p);
        let v = inv_det * direction.dot(&qvec);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let point = v1.scale(1.0 - u - v) + v2.scale(u) + v3.scale(v);
        let t = (point - ray.origin()).dot(direction);
        if t <= EPSILON {
            return None;
        }

        Some(Hit::new(t, point, self.normal))
    }
}

impl Lerp for Triangle {
    /// Blends the vertices and derives a fresh face normal from them.
    fn lerp(a: &Triangle, b: &Triangle, alpha: f64) -> Triangle {
        Triangle::new(
            Vec3::lerp(&a.vertices[0], &b.vertices[0], alpha),
            Vec3::lerp(&a.vertices[1], &b.vertices[1], alpha),
            Vec3::lerp(&a.vertices[2], &b.vertices[2], alpha),
        )
    }
}
