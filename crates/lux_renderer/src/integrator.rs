//! Path integrator: the intersect-then-scatter bounce loop.

use crate::camera::Camera;
use crate::sampling::gen_f32;
use crate::settings::RenderSettings;
use crate::surface::SurfaceList;
use lux_math::{Interval, Ray, Vec3};
use rand::RngCore;

/// Bias on the near end of the hit interval; keeps a bounce from
/// re-hitting the surface it just left.
const T_MIN: f32 = 1e-4;

/// Estimate the radiance carried back along `ray`.
///
/// Loops up to `settings.max_bounces` times. A miss terminates with the
/// running attenuation times the sky color. A scattering hit multiplies
/// the running attenuation and follows the continuation ray. A terminal
/// hit returns the attenuated emission for light sources and black for
/// absorption. Paths that exhaust the bounce budget contribute no
/// radiance.
pub fn radiance(
    ray: &Ray,
    world: &SurfaceList,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Vec3 {
    let mut running = Vec3::ONE;
    let mut ray = *ray;

    for _ in 0..settings.max_bounces {
        match world.hit(&ray, Interval::new(T_MIN, f32::INFINITY)) {
            Some(rec) => {
                let scatter = rec.material.scatter(&ray, &rec, rng);
                if scatter.continues {
                    running *= scatter.attenuation;
                    ray = scatter.ray;
                } else if scatter.light_source {
                    return running * scatter.attenuation;
                } else {
                    // Absorbed
                    return Vec3::ZERO;
                }
            }
            None => return running * settings.sky_color,
        }
    }

    // Unresolved path: lost energy, not an error
    Vec3::ZERO
}

/// Average `settings.samples_per_pixel` jittered estimates for the pixel
/// at (x, y).
///
/// Every sample is clamped to [0, 1] per channel before accumulation;
/// light sources exceed 1 and would otherwise swamp the average.
pub fn render_pixel(
    camera: &Camera,
    world: &SurfaceList,
    x: u32,
    y: u32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Vec3 {
    let mut color = Vec3::ZERO;

    for _ in 0..settings.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / settings.width as f32;
        let t = (y as f32 + gen_f32(rng)) / settings.height as f32;
        let ray = camera.ray(s, t);
        color += radiance(&ray, world, settings, rng).clamp(Vec3::ZERO, Vec3::ONE);
    }

    color / settings.samples_per_pixel as f32
}
