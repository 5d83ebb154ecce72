use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Positions, directions, normals and RGB colors all share this type.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Vec3<T> {
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Copy> Vec3<T> {
    #[inline]
    pub fn splat(v: T) -> Self {
        Self::new(v, v, v)
    }
}

impl<T: Copy> From<[T; 3]> for Vec3<T> {
    #[inline]
    fn from(v: [T; 3]) -> Self {
        Vec3::new(v[0], v[1], v[2])
    }
}

impl<T: Copy + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn scale(&self, factor: T) -> Vec3<T> {
        Vec3 {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

impl<T: Copy + Add<Output = T> + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn dot(&self, other: &Vec3<T>) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl<T: Copy + Sub<Output = T> + Mul<Output = T>> Vec3<T> {
    #[inline]
    pub fn cross(&self, other: &Vec3<T>) -> Vec3<T> {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl Vec3<f64> {
    pub const ZERO: Vec3<f64> = Vec3::new(0.0, 0.0, 0.0);

    #[inline]
    pub fn len(&self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn unit(&self) -> Vec3<f64> {
        let len = self.len();

        Vec3 {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
        }
    }

    /// Mirrors `self` about the plane with the given unit `normal`.
    #[inline]
    pub fn reflect(&self, normal: &Vec3<f64>) -> Vec3<f64> {
        *self - normal.scale(2.0 * normal.dot(self))
    }
}

impl<T: Add<Output = T>> Add for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn add(self, other: Vec3<T>) -> Self::Output {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl<T: Copy + Add<Output = T>> AddAssign for Vec3<T> {
    #[inline]
    fn add_assign(&mut self, other: Vec3<T>) {
        *self = *self + other;
    }
}

impl<T: Sub<Output = T>> Sub for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn sub(self, other: Vec3<T>) -> Self::Output {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// Component-wise product, used to modulate colors.
impl<T: Mul<Output = T>> Mul for Vec3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn mul(self, other: Vec3<T>) -> Self::Output {
        Vec3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }
}

impl Div<f64> for Vec3<f64> {
    type Output = Vec3<f64>;

    #[inline]
    fn div(self, divisor: f64) -> Self::Output {
        Vec3 {
            x: self.x / divisor,
            y: self.y / divisor,
            z: self.z / divisor,
        }
    }
}

#[cfg(test)]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(test)]
impl AbsDiffEq for Vec3<f64> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

#[cfg(test)]
impl RelativeEq for Vec3<f64> {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
