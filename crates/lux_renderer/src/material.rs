//! Materials: how light scatters at a surface.

use crate::sampling::{gen_f32, random_in_unit_sphere};
use crate::surface::HitRecord;
use lux_math::{reflect, refract, Ray, Vec3};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of one scattering event.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    /// Replacement ray describing the next bounce.
    pub ray: Ray,
    /// Per-channel multiplicative factor for the running light contribution.
    pub attenuation: Color,
    /// True when the surface emits light rather than merely reflecting it.
    pub light_source: bool,
    /// False when the path terminates at this surface.
    pub continues: bool,
}

/// Surface material: a closed set of scattering behaviors dispatched by
/// `match`.
///
/// Materials are immutable once built and shared by reference across every
/// surface (and thread) that uses them.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Lambertian diffuse; simulates a rough, matte surface.
    Diffuse { albedo: Color },
    /// Mirror reflection, roughened by `fuzz`.
    Metal { albedo: Color, fuzz: f32 },
    /// Dielectric with an angle-dependent reflect/refract choice.
    Glass { albedo: Color, refractive_index: f32 },
    /// Emits `strength` times its albedo.
    Emissive {
        albedo: Color,
        strength: f32,
        continue_tracing: bool,
    },
    /// Tints transmitted light by view angle.
    Translucent {
        albedo: Color,
        translucency: f32,
        scattering: f32,
    },
    /// Debug: paints the surface normal.
    Normals,
}

impl Material {
    pub fn diffuse(albedo: Color) -> Self {
        Material::Diffuse { albedo }
    }

    /// `fuzz` is clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Common refractive indices: air 1.0, glass 1.3-1.7, diamond 2.4.
    pub fn glass(albedo: Color, refractive_index: f32) -> Self {
        Material::Glass {
            albedo,
            refractive_index,
        }
    }

    /// `continue_tracing` decides whether a path keeps bouncing after the
    /// light is accounted for.
    pub fn emissive(albedo: Color, strength: f32, continue_tracing: bool) -> Self {
        Material::Emissive {
            albedo,
            strength,
            continue_tracing,
        }
    }

    /// `translucency` and `scattering` are clamped to [0, 1].
    pub fn translucent(albedo: Color, translucency: f32, scattering: f32) -> Self {
        Material::Translucent {
            albedo,
            translucency: translucency.clamp(0.0, 1.0),
            scattering: scattering.clamp(0.0, 1.0),
        }
    }

    /// Scatter `ray_in` at the hit described by `rec`.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Scatter {
        match self {
            Material::Diffuse { albedo } => {
                let target = rec.p + rec.normal + random_in_unit_sphere(rng);
                Scatter {
                    ray: Ray::new(rec.p, target - rec.p),
                    attenuation: *albedo,
                    light_source: false,
                    continues: true,
                }
            }

            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + *fuzz * random_in_unit_sphere(rng);
                Scatter {
                    ray: Ray::new(rec.p, direction),
                    attenuation: *albedo,
                    light_source: false,
                    // A fuzzed ray that re-enters the surface is absorbed.
                    continues: direction.dot(rec.normal) > 0.0,
                }
            }

            Material::Glass {
                albedo,
                refractive_index,
            } => {
                let dir = ray_in.direction();
                let reflected = reflect(dir, rec.normal);

                // rec.normal points outward; flip it when the ray leaves
                // the medium.
                let (outward_normal, ni_over_nt, cosine) = if dir.dot(rec.normal) > 0.0 {
                    (
                        -rec.normal,
                        *refractive_index,
                        refractive_index * dir.dot(rec.normal) / dir.length(),
                    )
                } else {
                    (
                        rec.normal,
                        1.0 / refractive_index,
                        -dir.dot(rec.normal) / dir.length(),
                    )
                };

                let direction = match refract(dir, outward_normal, ni_over_nt) {
                    Some(refracted) => {
                        if gen_f32(rng) < schlick(cosine, *refractive_index) {
                            reflected
                        } else {
                            refracted
                        }
                    }
                    // Total internal reflection
                    None => reflected,
                };

                Scatter {
                    ray: Ray::new(rec.p, direction),
                    attenuation: *albedo,
                    light_source: false,
                    continues: true,
                }
            }

            Material::Emissive {
                albedo,
                strength,
                continue_tracing,
            } => {
                let target = rec.p + rec.normal + random_in_unit_sphere(rng);
                Scatter {
                    ray: Ray::new(rec.p, target - rec.p),
                    attenuation: *albedo * *strength,
                    light_source: true,
                    continues: *continue_tracing,
                }
            }

            Material::Translucent {
                albedo,
                translucency,
                scattering,
            } => {
                let dir = ray_in.direction();
                // View-angle cosine shifted into [0, 1]
                let cosine = 0.5 * (dir.dot(rec.normal) / dir.length() + 1.0);
                let direction = rec.p + dir + *scattering * 5.0 * random_in_unit_sphere(rng);
                Scatter {
                    ray: Ray::new(rec.p, direction),
                    attenuation: cosine * *albedo + Vec3::splat(*translucency),
                    light_source: false,
                    continues: true,
                }
            }

            Material::Normals => Scatter {
                ray: *ray_in,
                attenuation: rec.normal,
                light_source: true,
                continues: false,
            },
        }
    }
}

/// Schlick's polynomial approximation of angle-dependent Fresnel
/// reflectance.
fn schlick(cosine: f32, refractive_index: f32) -> f32 {
    let r0 = ((1.0 - refractive_index) / (1.0 + refractive_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
