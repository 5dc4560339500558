//! Sphere primitive.

use crate::material::Material;
use crate::surface::HitRecord;
use lux_math::{Interval, Ray, Vec3};
use std::sync::Arc;

/// A sphere described by center, radius, and material.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    radius_sq: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            radius_sq: radius * radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Solve the ray/sphere quadratic and report the nearest root inside
    /// the open interval `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius_sq;

        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Nearer root first; the farther root only counts when the nearer
        // one falls outside the interval.
        let mut root = (-b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            normal: (p - self.center) / self.radius,
            material: self.material.as_ref(),
        })
    }
}
