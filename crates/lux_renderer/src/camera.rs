//! Camera: maps normalized image-plane coordinates to world rays.

use lux_math::{Ray, Vec3};

/// A look-at camera, fixed at construction.
///
/// Everything is precomputed once; [`Camera::ray`] is pure and safe to call
/// from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Build a camera from a viewing transform.
    ///
    /// `vfov` is the vertical field of view in degrees; `aspect` is
    /// width / height.
    pub fn new(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f32, aspect: f32) -> Self {
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect * half_height;

        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        Self {
            origin: look_from,
            lower_left: look_from - half_width * u - half_height * v - w,
            horizontal: 2.0 * half_width * u,
            vertical: 2.0 * half_height * v,
        }
    }

    /// The ray through the image-plane point (s, t), for s, t in [0, 1].
    pub fn ray(&self, s: f32, t: f32) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left + s * self.horizontal + t * self.vertical - self.origin,
        )
    }
}
