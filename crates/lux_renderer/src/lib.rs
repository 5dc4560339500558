//! LUX renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over implicit surfaces:
//! - Closed sum types for surfaces and materials, dispatched by `match`
//! - An iterative, bounce-capped light-transport loop
//! - A render pool whose workers claim pixels from a shared atomic cursor
//!   and write packed RGBA words into a shared framebuffer, lock-free
//!
//! Presentation (windows, file encoding) and scene description live outside
//! this crate; see the `render_scene` example for the wiring.

mod camera;
mod error;
mod framebuffer;
mod integrator;
mod material;
mod pool;
mod sampling;
mod settings;
mod sphere;
mod surface;

pub use camera::Camera;
pub use error::RenderError;
pub use framebuffer::{pack_rgba, unpack_rgba, FrameBuffer};
pub use integrator::{radiance, render_pixel};
pub use material::{Color, Material, Scatter};
pub use pool::RenderPool;
pub use sampling::{gen_f32, random_in_unit_sphere};
pub use settings::RenderSettings;
pub use sphere::Sphere;
pub use surface::{HitRecord, Surface, SurfaceList};

/// Re-export the math types callers need alongside the renderer.
pub use lux_math::{Interval, Ray, Vec3};
