//! Linear interpolation between two snapshots of the same value.

use crate::vec3::Vec3;

/// Blends two values: `alpha == 0` yields `a`, `alpha == 1` yields `b`.
///
/// Every implementation must satisfy `lerp(x, x, alpha) == x` up to
/// floating point rounding.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, alpha: f64) -> Self;
}

impl Lerp for f64 {
    #[inline]
    fn lerp(a: &f64, b: &f64, alpha: f64) -> f64 {
        (1.0 - alpha) * a + alpha * b
    }
}

impl Lerp for Vec3<f64> {
    #[inline]
    fn lerp(a: &Vec3<f64>, b: &Vec3<f64>, alpha: f64) -> Vec3<f64> {
        a.scale(1.0 - alpha) + b.scale(alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let a = Vec3::new(0.1, -2.5, 7.0);
        let b = Vec3::new(3.3, 0.25, -1.0);

        assert_eq!(a, Vec3::lerp(&a, &b, 0.0));
        assert_eq!(b, Vec3::lerp(&a, &b, 1.0));
    }

    #[test]
    fn midpoint() {
        assert_eq!(1.5, f64::lerp(&1.0, &2.0, 0.5));
    }
}
