//! Named property assignment shared by every scene reader.

use crate::{
    camera::Camera,
    geometry::{Model, Shape},
    light::Light,
    vec3::Vec3,
};

#[derive(Debug, thiserror::Error)]
#[error("`{key}` expects {expected} value(s), found {found}")]
pub struct PropertyError {
    pub key: String,
    pub expected: usize,
    pub found: usize,
}

/// Entities whose fields can be patched by lowercase property name.
pub trait Properties {
    /// Assigns `values` to `key`. Returns `Ok(false)` when the key is unknown
    /// to this entity, leaving it untouched.
    fn apply(&mut self, key: &str, values: &[f64]) -> Result<bool, PropertyError>;
}

fn arity(key: &str, values: &[f64], expected: usize) -> Result<(), PropertyError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(PropertyError {
            key: key.to_owned(),
            expected,
            found: values.len(),
        })
    }
}

fn scalar(key: &str, values: &[f64]) -> Result<f64, PropertyError> {
    arity(key, values, 1)?;
    Ok(values[0])
}

fn vector(key: &str, values: &[f64]) -> Result<Vec3<f64>, PropertyError> {
    arity(key, values, 3)?;
    Ok(Vec3::new(values[0], values[1], values[2]))
}

impl Properties for Model {
    fn apply(&mut self, key: &str, values: &[f64]) -> Result<bool, PropertyError> {
        match (&mut self.shape, key) {
            (_, "diffuse") => self.material.diffuse = vector(key, values)?,
            (_, "specular") => self.material.specular = vector(key, values)?,
            (_, "shininess") => self.material.shininess = scalar(key, values)?,
            (Shape::Sphere(sphere), "position") => sphere.center = vector(key, values)?,
            (Shape::Sphere(sphere), "radius") => sphere.radius = scalar(key, values)?,
            (Shape::Plane(plane), "point") => plane.point = vector(key, values)?,
            (Shape::Plane(plane), "normal") => plane.set_normal(vector(key, values)?),
            (Shape::Triangle(triangle), "v1") => triangle.set_vertex(0, vector(key, values)?),
            (Shape::Triangle(triangle), "v2") => triangle.set_vertex(1, vector(key, values)?),
            (Shape::Triangle(triangle), "v3") => triangle.set_vertex(2, vector(key, values)?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl Properties for Camera {
    fn apply(&mut self, key: &str, values: &[f64]) -> Result<bool, PropertyError> {
        match key {
            "position" => self.position = vector(key, values)?,
            "lookat" => self.lookat = vector(key, values)?,
            "up" => self.up = vector(key, values)?,
            "fov" => self.fov = scalar(key, values)?,
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl Properties for Light {
    fn apply(&mut self, key: &str, values: &[f64]) -> Result<bool, PropertyError> {
        match key {
            "position" => self.position = vector(key, values)?,
            "diffuse" => self.diffuse = vector(key, values)?,
            "specular" => self.specular = vector(key, values)?,
            _ => return Ok(false),
        }

        Ok(true)
    }
}
