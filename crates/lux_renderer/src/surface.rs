//! Surfaces rays can hit, and the aggregate that tests them as one scene.

use crate::material::Material;
use crate::sphere::Sphere;
use lux_math::{Interval, Ray, Vec3};

/// Record of a ray/surface intersection.
///
/// Valid for one intersect-then-scatter step. `material` is a non-owning
/// view into scene-owned data.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Parametric distance along the ray.
    pub t: f32,
    /// World-space hit point.
    pub p: Vec3,
    /// Unit normal at `p`, oriented outward from the surface.
    pub normal: Vec3,
    /// Material at the hit point.
    pub material: &'a Material,
}

/// A surface a ray can intersect: a closed set of shapes dispatched by
/// `match`.
pub enum Surface {
    Sphere(Sphere),
}

impl Surface {
    /// Test the ray within the open interval `ray_t`, reporting the nearest
    /// valid intersection.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Surface::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

/// An unordered collection of surfaces tested as one.
///
/// Membership never changes during a render pass, which is what lets many
/// worker threads read the list concurrently with no synchronization.
#[derive(Default)]
pub struct SurfaceList {
    surfaces: Vec<Surface>,
}

impl SurfaceList {
    /// Create a new empty surface list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a surface to the list.
    pub fn add(&mut self, surface: impl Into<Surface>) {
        self.surfaces.push(surface.into());
    }

    /// Get the number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// The closest hit across all members, if any.
    ///
    /// The effective `t_max` shrinks to the best `t` found so far, so later
    /// members only qualify by getting closer; test order never changes the
    /// result.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest_so_far = ray_t.max;
        let mut best = None;

        for surface in &self.surfaces {
            if let Some(rec) = surface.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                best = Some(rec);
            }
        }

        best
    }
}
