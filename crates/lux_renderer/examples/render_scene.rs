//! Renders the demo scene with the render pool and saves a PNG.
//!
//! Run with `RUST_LOG=info` to see pool lifecycle events.

use anyhow::Result;
use lux_renderer::{
    Camera, FrameBuffer, Material, RenderPool, RenderSettings, Sphere, SurfaceList, Vec3,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    env_logger::init();

    let setup_start = Instant::now();

    let settings = RenderSettings {
        width: 1280,
        height: 720,
        samples_per_pixel: 8,
        max_bounces: 64,
        sky_color: Vec3::new(0.1, 0.1, 0.1),
        threads: 8,
        seed: None,
    };

    let world = Arc::new(build_scene());
    let camera = Camera::new(
        Vec3::new(-1.0, 0.0, 2.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        70.0,
        settings.aspect(),
    );
    let framebuffer = Arc::new(FrameBuffer::new(settings.width, settings.height));

    let mut pool = RenderPool::new(settings.threads);
    pool.init(
        Arc::clone(&world),
        camera,
        Arc::clone(&framebuffer),
        settings.clone(),
    )?;

    println!(
        "Rendering {}x{} @ {} spp on {} threads...",
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        pool.num_threads()
    );

    let render_start = Instant::now();
    pool.start()?;

    while pool.busy() {
        let done = pool.pixels_consumed() as f32 / pool.pixels_total() as f32;
        println!("{:3.0}% done", done * 100.0);
        std::thread::sleep(Duration::from_millis(500));
    }
    pool.stop();
    let render_time = render_start.elapsed();

    println!("Render complete.");
    println!(
        "Setup took:  {:.3} seconds.",
        render_start.duration_since(setup_start).as_secs_f64()
    );
    println!("Render took: {:.3} seconds.", render_time.as_secs_f64());

    image::save_buffer(
        "render.png",
        &framebuffer.to_rgba_bytes(),
        settings.width,
        settings.height,
        image::ColorType::Rgba8,
    )?;
    println!("Saved to render.png");

    Ok(())
}

fn build_scene() -> SurfaceList {
    let spheres = [
        // Ground
        (
            Vec3::new(0.0, 100.6, -2.0),
            100.0,
            Material::diffuse(Vec3::new(0.3, 0.5, 0.7)),
        ),
        (
            Vec3::new(0.0, 0.0, -2.0),
            0.5,
            Material::diffuse(Vec3::new(0.8, 0.3, 0.3)),
        ),
        (
            Vec3::new(2.6, -1.4, -1.7),
            0.7,
            Material::metal(Vec3::new(0.7, 0.7, 0.7), 0.4),
        ),
        (
            Vec3::new(1.0, 0.0, -2.0),
            0.4,
            Material::metal(Vec3::new(0.3, 0.4, 0.9), 0.05),
        ),
        (
            Vec3::new(-0.3, 0.1, -1.0),
            0.3,
            Material::glass(Vec3::new(0.5, 1.0, 0.6), 0.9),
        ),
        (
            Vec3::new(0.0, 0.2, 1.0),
            0.3,
            Material::glass(Vec3::new(0.8, 0.2, 0.3), 1.5),
        ),
        (
            Vec3::new(-1.0, -0.3, -1.2),
            0.2,
            Material::emissive(Vec3::new(0.3, 0.2, 0.0), 9.0, false),
        ),
        (
            Vec3::new(0.3, -0.5, -1.1),
            0.2,
            Material::emissive(Vec3::new(0.0, 0.1, 0.9), 10.0, false),
        ),
        // Big soft fill light below
        (
            Vec3::new(0.0, -5.0, -3.0),
            2.0,
            Material::emissive(Vec3::new(1.0, 1.0, 1.0), 1.0, false),
        ),
    ];

    let mut world = SurfaceList::new();
    for (center, radius, material) in spheres {
        world.add(Sphere::new(center, radius, Arc::new(material)));
    }
    world
}
