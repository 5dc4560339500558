//! Random sampling helpers.

use lux_math::Vec3;
use rand::{Rng, RngCore};

/// Sample a uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}

/// Sample a uniform point inside the unit sphere by rejection.
///
/// Draws from [-1,1]^3 and redraws until the point lands inside the sphere.
/// A draw accepts with probability pi/6, so the loop runs about 1.91 times
/// on average; there is no iteration bound, termination is probabilistic.
/// Pass a seeded rng where the sample sequence must be reproducible.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}
