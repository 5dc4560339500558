//! Render configuration.

use lux_math::Vec3;

/// Parameters for one render, handed to the pool at init.
///
/// A plain value, so independent renders (and tests) run with different
/// parameters without process-wide state.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Output image width in pixels.
    pub width: u32,
    /// Output image height in pixels.
    pub height: u32,
    /// Jittered samples averaged per pixel.
    pub samples_per_pixel: u32,
    /// Bounce cap for the path integrator.
    pub max_bounces: u32,
    /// Radiance for rays that escape the scene.
    pub sky_color: Vec3,
    /// Requested worker thread count; the pool clamps it to what the
    /// hardware supports.
    pub threads: u32,
    /// Base seed for per-worker sample sequences. `None` draws from
    /// entropy.
    pub seed: Option<u64>,
}

impl RenderSettings {
    /// Total number of pixels (render jobs) in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            samples_per_pixel: 8,
            max_bounces: 64,
            sky_color: Vec3::new(0.1, 0.1, 0.1),
            threads: 8,
            seed: None,
        }
    }
}
