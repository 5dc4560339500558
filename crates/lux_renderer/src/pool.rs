//! The work-distribution engine.
//!
//! One job per pixel. Workers claim jobs from a shared atomic cursor; once
//! a worker owns an index, everything downstream (sampling, integration,
//! the framebuffer store) runs without synchronization, because no two
//! workers ever hold the same index.

use crate::camera::Camera;
use crate::error::RenderError;
use crate::framebuffer::{pack_rgba, FrameBuffer};
use crate::integrator::render_pixel;
use crate::settings::RenderSettings;
use crate::surface::SurfaceList;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Everything a worker needs. Read-only for the duration of a render,
/// except the two atomics.
struct Job {
    world: Arc<SurfaceList>,
    camera: Camera,
    target: Arc<FrameBuffer>,
    settings: RenderSettings,
    /// Monotonic cursor; `fetch_add` hands each index in `[0, total)` to
    /// exactly one worker.
    next_pixel: AtomicU32,
    /// Raised by the first worker to observe exhaustion, or by `stop()`.
    /// Only ever set during a run, never cleared, so unlocked reads are a
    /// safe fast-path hint.
    terminate: AtomicBool,
}

/// A fixed pool of render workers with an idle/running lifecycle.
///
/// `init` binds the scene, camera, destination buffer, and settings;
/// `start` spawns the workers; the polling methods observe progress;
/// `stop` blocks until every worker has joined. A stopped pool can be
/// started again (the same job re-renders) or re-initialized.
pub struct RenderPool {
    num_threads: u32,
    workers: Vec<JoinHandle<()>>,
    job: Option<Arc<Job>>,
}

impl RenderPool {
    /// Create a pool of `requested` workers.
    ///
    /// The count is clamped to at least 1 and at most the hardware
    /// concurrency minus one: the spawning thread still needs a core.
    /// Which clamp applied, if any, is not reported.
    pub fn new(requested: u32) -> Self {
        let available = std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .unwrap_or(1);
        let cap = available.saturating_sub(1).max(1);

        Self {
            num_threads: requested.clamp(1, cap),
            workers: Vec::new(),
            job: None,
        }
    }

    /// Bind a render job.
    ///
    /// Fails if the pool is running, or if `target` was not sized for
    /// `settings` (width x height pixels).
    pub fn init(
        &mut self,
        world: Arc<SurfaceList>,
        camera: Camera,
        target: Arc<FrameBuffer>,
        settings: RenderSettings,
    ) -> Result<(), RenderError> {
        if self.is_running() {
            return Err(RenderError::AlreadyRunning);
        }
        let expected = settings.pixel_count();
        if target.len() != expected {
            return Err(RenderError::BufferSizeMismatch {
                expected,
                actual: target.len(),
            });
        }

        self.job = Some(Arc::new(Job {
            world,
            camera,
            target,
            settings,
            next_pixel: AtomicU32::new(0),
            terminate: AtomicBool::new(false),
        }));
        Ok(())
    }

    /// Idle -> running: spawn the workers.
    pub fn start(&mut self) -> Result<(), RenderError> {
        if self.is_running() {
            return Err(RenderError::AlreadyRunning);
        }
        let job = Arc::clone(self.job.as_ref().ok_or(RenderError::NotInitialized)?);

        job.next_pixel.store(0, Ordering::Relaxed);
        job.terminate.store(false, Ordering::Relaxed);

        for id in 0..self.num_threads {
            let job = Arc::clone(&job);
            let handle = std::thread::Builder::new()
                .name(format!("render-{id}"))
                .spawn(move || worker_loop(id, job))
                .expect("failed to spawn render worker");
            self.workers.push(handle);
        }

        log::info!(
            "render pool started: {} workers, {} pixels",
            self.num_threads,
            self.pixels_total()
        );
        Ok(())
    }

    /// Running -> idle: request shutdown and block until every worker has
    /// joined. Workers drain the pixel they hold; nothing is aborted
    /// mid-pixel. A no-op when idle.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        if let Some(job) = self.job.as_ref() {
            job.terminate.store(true, Ordering::Relaxed);
        }
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
        log::info!("render pool stopped");
    }

    /// True while worker threads exist (they may already be draining).
    pub fn is_running(&self) -> bool {
        !self.workers.is_empty()
    }

    /// True while unclaimed pixels remain.
    pub fn busy(&self) -> bool {
        self.pixels_remaining() > 0
    }

    /// Fast-path completion hint: raised once every pixel is claimed.
    pub fn should_terminate(&self) -> bool {
        self.job
            .as_ref()
            .is_some_and(|job| job.terminate.load(Ordering::Relaxed))
    }

    /// The clamped worker count.
    pub fn num_threads(&self) -> u32 {
        self.num_threads
    }

    /// Total pixel jobs in the bound render, zero when uninitialized.
    pub fn pixels_total(&self) -> u32 {
        self.job
            .as_ref()
            .map(|job| job.settings.pixel_count() as u32)
            .unwrap_or(0)
    }

    /// Pixels claimed so far.
    pub fn pixels_consumed(&self) -> u32 {
        let claimed = self
            .job
            .as_ref()
            .map(|job| job.next_pixel.load(Ordering::Relaxed))
            .unwrap_or(0);
        claimed.min(self.pixels_total())
    }

    /// Pixels not yet claimed.
    pub fn pixels_remaining(&self) -> u32 {
        self.pixels_total() - self.pixels_consumed()
    }
}

impl Drop for RenderPool {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_loop(id: u32, job: Arc<Job>) {
    let total = job.settings.pixel_count() as u32;
    let mut rng = match job.settings.seed {
        Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(id as u64)),
        None => SmallRng::from_entropy(),
    };

    while !job.terminate.load(Ordering::Relaxed) {
        let index = job.next_pixel.fetch_add(1, Ordering::Relaxed);
        if index >= total {
            job.terminate.store(true, Ordering::Relaxed);
            break;
        }

        let x = index % job.settings.width;
        let y = index / job.settings.width;
        let color = render_pixel(&job.camera, &job.world, x, y, &job.settings, &mut rng);
        job.target.store(index as usize, pack_rgba(color));
    }

    log::debug!("render worker {id} stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::unpack_rgba;
    use crate::material::Material;
    use crate::sphere::Sphere;
    use lux_math::Vec3;
    use std::time::Duration;

    fn run_to_completion(pool: &mut RenderPool) {
        pool.start().unwrap();
        while pool.busy() {
            std::thread::sleep(Duration::from_millis(1));
        }
        pool.stop();
    }

    fn demo_camera(settings: &RenderSettings) -> Camera {
        Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 70.0, settings.aspect())
    }

    #[test]
    fn test_thread_count_is_clamped() {
        assert_eq!(RenderPool::new(0).num_threads(), 1);
        assert!(RenderPool::new(1).num_threads() >= 1);
        let huge = RenderPool::new(u32::MAX).num_threads();
        assert!(huge >= 1 && huge < 4096);
    }

    #[test]
    fn test_pixel_indices_claimed_exactly_once() {
        // The claim discipline the worker loop runs, instrumented with a
        // counter per index.
        let total = 10_000u32;
        let cursor = AtomicU32::new(0);
        let claims: Vec<AtomicU32> = (0..total).map(|_| AtomicU32::new(0)).collect();

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    if index >= total {
                        break;
                    }
                    claims[index as usize].fetch_add(1, Ordering::Relaxed);
                });
            }
        });

        assert!(claims.iter().all(|c| c.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn test_buffer_size_mismatch_rejected() {
        let settings = RenderSettings {
            width: 8,
            height: 8,
            ..Default::default()
        };
        let camera = demo_camera(&settings);
        let target = Arc::new(FrameBuffer::new(4, 4));

        let mut pool = RenderPool::new(1);
        let err = pool
            .init(Arc::new(SurfaceList::new()), camera, target, settings)
            .unwrap_err();
        assert_eq!(
            err,
            RenderError::BufferSizeMismatch {
                expected: 64,
                actual: 16
            }
        );
    }

    #[test]
    fn test_start_requires_init() {
        let mut pool = RenderPool::new(1);
        assert_eq!(pool.start().unwrap_err(), RenderError::NotInitialized);
    }

    #[test]
    fn test_every_pixel_written_once_per_run() {
        // Packed pixels always carry an opaque alpha, so a zeroed buffer
        // turns fully nonzero exactly when every index was written.
        for threads in [1, 2, 4] {
            let settings = RenderSettings {
                width: 32,
                height: 8,
                samples_per_pixel: 1,
                max_bounces: 4,
                sky_color: Vec3::new(0.7, 0.8, 1.0),
                threads,
                seed: Some(42),
            };
            let camera = demo_camera(&settings);
            let target = Arc::new(FrameBuffer::new(settings.width, settings.height));

            let mut pool = RenderPool::new(threads);
            pool.init(
                Arc::new(SurfaceList::new()),
                camera,
                Arc::clone(&target),
                settings,
            )
            .unwrap();
            run_to_completion(&mut pool);

            assert!(!pool.is_running());
            assert_eq!(pool.pixels_remaining(), 0);
            assert!((0..target.len()).all(|i| target.load(i) != 0));
        }
    }

    #[test]
    fn test_stop_is_immediate_and_joins() {
        let settings = RenderSettings {
            width: 512,
            height: 512,
            samples_per_pixel: 64,
            ..Default::default()
        };
        let camera = demo_camera(&settings);
        let target = Arc::new(FrameBuffer::new(settings.width, settings.height));

        let mut pool = RenderPool::new(2);
        pool.init(Arc::new(SurfaceList::new()), camera, target, settings)
            .unwrap();
        pool.start().unwrap();
        pool.stop();

        assert!(!pool.is_running());
        assert!(pool.pixels_consumed() <= pool.pixels_total());
    }

    #[test]
    fn test_restart_after_full_stop() {
        let settings = RenderSettings {
            width: 16,
            height: 16,
            samples_per_pixel: 1,
            max_bounces: 4,
            ..Default::default()
        };
        let camera = demo_camera(&settings);
        let target = Arc::new(FrameBuffer::new(settings.width, settings.height));

        let mut pool = RenderPool::new(2);
        pool.init(Arc::new(SurfaceList::new()), camera, target, settings)
            .unwrap();
        run_to_completion(&mut pool);
        let first = pool.pixels_consumed();

        run_to_completion(&mut pool);
        assert_eq!(first, pool.pixels_consumed());
        assert_eq!(pool.pixels_remaining(), 0);
    }

    #[test]
    fn test_end_to_end_sphere_against_sky() {
        // A single diffuse sphere lit only by the sky: darker disk at the
        // image center, exact sky color in the corners.
        let settings = RenderSettings {
            width: 64,
            height: 36,
            samples_per_pixel: 8,
            max_bounces: 16,
            sky_color: Vec3::new(0.7, 0.8, 1.0),
            threads: 4,
            seed: Some(42),
        };
        let mut world = SurfaceList::new();
        world.add(Sphere::new(
            Vec3::new(0.0, 0.0, -2.0),
            0.5,
            Arc::new(Material::diffuse(Vec3::new(0.8, 0.3, 0.3))),
        ));
        let camera = demo_camera(&settings);
        let target = Arc::new(FrameBuffer::new(settings.width, settings.height));

        let mut pool = RenderPool::new(settings.threads);
        pool.init(Arc::new(world), camera, Arc::clone(&target), settings.clone())
            .unwrap();
        run_to_completion(&mut pool);

        let luminance = |index: usize| {
            let [r, g, b, _] = unpack_rgba(target.load(index));
            r as u32 + g as u32 + b as u32
        };
        let sky = pack_rgba(settings.sky_color);

        // Corners never see the sphere
        let w = settings.width as usize;
        let h = settings.height as usize;
        for corner in [0, w - 1, (h - 1) * w, h * w - 1] {
            assert_eq!(target.load(corner), sky);
        }

        // Center of the disk is darker than the sky
        let center = (h / 2) * w + w / 2;
        assert!(luminance(center) < luminance(0));
    }
}
