use crate::vec3::Vec3;

#[derive(Copy, Clone, Debug)]
pub struct Ray<T> {
    origin: Vec3<T>,
    direction: Vec3<T>,
}

impl Ray<f64> {
    /// Builds a ray, normalizing `direction`.
    ///
    /// Intersection routines rely on a unit direction so that `t` is a
    /// distance along the ray.
    pub fn new(origin: Vec3<f64>, direction: Vec3<f64>) -> Self {
        Self {
            origin,
            direction: direction.unit(),
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec3<f64> {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> &Vec3<f64> {
        &self.direction
    }

    #[inline]
    pub fn offset(&self, t: f64) -> Vec3<f64> {
        self.origin + self.direction.scale(t)
    }
}
