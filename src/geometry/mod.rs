use std::fmt;

use crate::{intersection::Intersection, lerp::Lerp, material::Material, ray::Ray, vec3::Vec3};

mod plane;
mod sphere;
mod triangle;

pub use self::plane::Plane;
pub use self::sphere::Sphere;
pub use self::triangle::Triangle;

/// Threshold below which geometric quantities count as degenerate.
pub const EPSILON: f64 = 1e-8;

/// Pure geometric part of a ray hit.
#[derive(Copy, Clone, Debug)]
pub struct Hit {
    pub t: f64,
    pub point: Vec3<f64>,
    pub normal: Vec3<f64>,
}

impl Hit {
    pub fn new(t: f64, point: Vec3<f64>, normal: Vec3<f64>) -> Self {
        Self { t, point, normal }
    }
}

pub trait Geometry {
    /// Nearest hit in front of the ray origin, if any.
    fn intersection(&self, ray: &Ray<f64>) -> Option<Hit>;
}

/// Shape variants without their data, as named in scene files.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Sphere,
    Plane,
    Triangle,
}

impl ShapeKind {
    pub fn from_keyword(keyword: &str) -> Option<ShapeKind> {
        match keyword {
            "sphere" => Some(ShapeKind::Sphere),
            "plane" => Some(ShapeKind::Plane),
            "triangle" => Some(ShapeKind::Triangle),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Plane => "plane",
            ShapeKind::Triangle => "triangle",
        }
    }

    pub fn default_shape(self) -> Shape {
        match self {
            ShapeKind::Sphere => Shape::Sphere(Sphere::default()),
            ShapeKind::Plane => Shape::Plane(Plane::default()),
            ShapeKind::Triangle => Shape::Triangle(Triangle::default()),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere(..) => ShapeKind::Sphere,
            Shape::Plane(..) => ShapeKind::Plane,
            Shape::Triangle(..) => ShapeKind::Triangle,
        }
    }

    /// Blends two shapes of the same variant; `None` when the variants differ.
    pub fn interpolate(a: &Shape, b: &Shape, alpha: f64) -> Option<Shape> {
        let shape = match (a, b) {
            (Shape::Sphere(a), Shape::Sphere(b)) => Shape::Sphere(Sphere::lerp(a, b, alpha)),
            (Shape::Plane(a), Shape::Plane(b)) => Shape::Plane(Plane::lerp(a, b, alpha)),
            (Shape::Triangle(a), Shape::Triangle(b)) => Shape::Triangle(Triangle::lerp(a, b, alpha)),
            _ => return None,
        };

        Some(shape)
    }
}

impl Geometry for Shape {
    #[inline]
    fn intersection(&self, ray: &Ray<f64>) -> Option<Hit> {
        match self {
            Shape::Sphere(s) => s.intersection(ray),
            Shape::Plane(p) => p.intersection(ray),
            Shape::Triangle(t) => t.intersection(ray),
        }
    }
}

/// A renderable object: a shape plus the material it owns.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Model {
    pub shape: Shape,
    pub material: Material,
}

impl Model {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }

    pub fn intersection(&self, ray: &Ray<f64>) -> Option<Intersection> {
        self.shape
            .intersection(ray)
            .map(|hit| Intersection::new(&self.material, hit.t, hit.point, hit.normal))
    }

    pub fn interpolate(a: &Model, b: &Model, alpha: f64) -> Option<Model> {
        let shape = Shape::interpolate(&a.shape, &b.shape, alpha)?;
        let material = Material::lerp(&a.material, &b.material, alpha);

        Some(Model { shape, material })
    }
}
