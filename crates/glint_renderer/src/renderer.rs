//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounce budget
//! - Anti-aliasing via jittered multi-sampling
//! - A sky gradient for rays that escape the scene

use std::time::Instant;

use crate::{gen_f32, Camera, Color, ConfigError, Hittable, Ray};
use glint_math::Interval;
use rand::RngCore;

/// Smallest accepted hit distance; suppresses self-intersection ("shadow
/// acne") of scattered rays leaving a surface.
pub const RAY_EPSILON: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels
    pub image_width: u32,
    /// Output height in pixels
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
        }
    }
}

impl RenderConfig {
    /// Check the settings before rendering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_width < 2 || self.image_height < 2 {
            return Err(ConfigError::InvalidResolution {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.image_width.checked_mul(self.image_height).is_none() {
            return Err(ConfigError::ImageTooLarge {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }

    /// Width over height of the output image.
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and accumulating attenuation until
/// the ray escapes, is absorbed, or runs out of bounces.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(RAY_EPSILON, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            scatter.attenuation * ray_color(&scatter.scattered, world, depth - 1, rng)
        }
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
///
/// Blends white at the horizon into light blue at the zenith based on
/// the height of the unit direction.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are pixel coordinates with `y` counted from the bottom row.
/// Returns the averaged linear color.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;
    let width = (config.image_width - 1) as f32;
    let height = (config.image_height - 1) as f32;

    for _ in 0..config.samples_per_pixel {
        let u = (x as f32 + gen_f32(rng)) / width;
        let v = (y as f32 + gen_f32(rng)) / height;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Simple image buffer for storing render output.
///
/// Pixels are stored row-major starting at the top scanline.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y), `y = 0` being the top row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[y as usize * self.width as usize + x as usize] = color;
    }
}

/// Render the entire scene to an image buffer.
///
/// Scanlines are traced top to bottom on the calling thread. All random
/// numbers come from `rng`, so a seeded generator reproduces the image.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Result<ImageBuffer, ConfigError> {
    config.validate()?;

    let start = Instant::now();
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth
    );

    let mut image = ImageBuffer::new(config.image_width, config.image_height);

    for row in 0..config.image_height {
        let j = config.image_height - 1 - row;
        log::debug!("Scanlines remaining: {}", j + 1);

        for i in 0..config.image_width {
            let color = render_pixel(camera, world, i, j, config, rng);
            image.set(i, row, color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}
