use crate::{lerp::Lerp, ray::Ray, vec3::Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3<f64>,
    pub lookat: Vec3<f64>,
    pub up: Vec3<f64>,
    /// Vertical field of view in degrees.
    pub fov: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            lookat: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: 90.0,
        }
    }
}

impl Camera {
    /// Derives the view plane for a `width` x `height` surface.
    ///
    /// The basis is never stored on the camera, so interpolated cameras
    /// always get a fresh one.
    pub fn viewport(&self, width: u32, height: u32) -> Viewport {
        let forward = (self.lookat - self.position).unit();
        let right = forward.cross(&self.up).unit();
        let up = right.cross(&forward);

        let aspect = width as f64 / height as f64;
        let distance = 1.0 / (self.fov.to_radians() / 2.0).tan();

        Viewport {
            eye: self.position,
            lower_left: self.position + forward.scale(distance) - right.scale(aspect) - up,
            dx: right.scale(2.0 * aspect / width as f64),
            dy: up.scale(2.0 / height as f64),
        }
    }
}

impl Lerp for Camera {
    fn lerp(a: &Camera, b: &Camera, alpha: f64) -> Camera {
        Camera {
            position: Vec3::lerp(&a.position, &b.position, alpha),
            lookat: Vec3::lerp(&a.lookat, &b.lookat, alpha),
            up: Vec3::lerp(&a.up, &b.up, alpha),
            fov: f64::lerp(&a.fov, &b.fov, alpha),
        }
    }
}

/// View plane spanned in front of the eye, in pixel units.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    pub eye: Vec3<f64>,
    lower_left: Vec3<f64>,
    dx: Vec3<f64>,
    dy: Vec3<f64>,
}

impl Viewport {
    /// Primary ray through the view-plane point at fractional pixel
    /// coordinates `(x, y)`, with `y` growing upwards from the bottom row.
    #[inline]
    pub fn ray(&self, x: f64, y: f64) -> Ray<f64> {
        let p = self.lower_left + self.dx.scale(x) + self.dy.scale(y);
        Ray::new(self.eye, p - self.eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn center_ray_points_at_lookat() {
        let camera = Camera {
            position: Vec3::new(1.0, 2.0, 3.0),
            lookat: Vec3::new(1.0, 2.0, -7.0),
            ..Camera::default()
        };

        let ray = camera.viewport(4, 2).ray(2.0, 1.0);

        assert_relative_eq!(Vec3::new(0.0, 0.0, -1.0), *ray.direction(), epsilon = 1e-12);
    }

    #[test]
    fn vertical_field_of_view_spans_bottom_to_top() {
        let camera = Camera::default();
        let viewport = camera.viewport(1, 1);

        let bottom = viewport.ray(0.5, 0.0);
        let top = viewport.ray(0.5, 1.0);
        let angle = bottom.direction().dot(top.direction()).acos().to_degrees();

        assert_relative_eq!(90.0, angle, epsilon = 1e-9);
    }

    #[test]
    fn lerp_blends_without_touching_identical_cameras() {
        let a = Camera {
            position: Vec3::new(0.0, 1.0, 5.0),
            fov: 60.0,
            ..Camera::default()
        };
        let b = Camera {
            position: Vec3::new(4.0, 1.0, 5.0),
            fov: 30.0,
            ..Camera::default()
        };

        let mid = Camera::lerp(&a, &b, 0.5);
        assert_relative_eq!(Vec3::new(2.0, 1.0, 5.0), mid.position, epsilon = 1e-12);
        assert_relative_eq!(45.0, mid.fov, epsilon = 1e-12);

        let same = Camera::lerp(&a, &a, 0.3);
        assert_relative_eq!(a.position, same.position, epsilon = 1e-12);
        assert_relative_eq!(a.lookat, same.lookat, epsilon = 1e-12);
        assert_relative_eq!(a.fov, same.fov, epsilon = 1e-12);
    }
}
