//! Glint renderer - CPU ray tracing core.
//!
//! A small Monte Carlo ray tracer over spheres with diffuse, metal and
//! glass materials. Randomness is always passed in explicitly so a seeded
//! generator reproduces an image bit for bit.

mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod random;
mod ray;
mod renderer;
mod scene;
mod sphere;

pub use camera::Camera;
pub use error::{ConfigError, RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, Scatter};
pub use output::{color_to_rgb, save_png, write_ppm, PPM_MAX_VALUE};
pub use random::{gen_f32, random_in_unit_disk, random_in_unit_sphere};
pub use ray::Ray;
pub use renderer::{
    ray_color, render, render_pixel, sky_gradient, ImageBuffer, RenderConfig, RAY_EPSILON,
};
pub use scene::{
    CameraDescription, MaterialDescription, Scene, SceneDescription, SphereDescription,
};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Vec3};
