//! Built-in scenes.

use std::sync::Arc;

use clap::ValueEnum;
use glint_renderer::{
    gen_f32, Camera, Color, Dielectric, HittableList, Lambertian, Material, Metal, RenderResult,
    Scene, Sphere, Vec3,
};
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenePreset {
    /// One white diffuse sphere in front of the camera
    Single,
    /// Diffuse, metal and hollow glass spheres on a ground plane
    Materials,
    /// A field of random small spheres around three large ones
    Cover,
}

impl ScenePreset {
    /// Build the scene. Only `Cover` draws from `rng`.
    pub fn build(self, rng: &mut dyn RngCore) -> RenderResult<Scene> {
        match self {
            ScenePreset::Single => single(),
            ScenePreset::Materials => materials(),
            ScenePreset::Cover => cover(rng),
        }
    }
}

fn shared(material: impl Into<Material>) -> Arc<Material> {
    Arc::new(material.into())
}

fn single() -> RenderResult<Scene> {
    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        shared(Lambertian::new(Color::ONE)),
    )?);

    Ok(Scene {
        world,
        camera: Camera::new(),
    })
}

fn materials() -> RenderResult<Scene> {
    let ground = shared(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center = shared(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass = shared(Dielectric::new(1.5)?);
    // Air bubble inside the glass sphere makes it hollow
    let bubble = shared(Dielectric::new(1.0 / 1.5)?);
    let gold = shared(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));

    let mut world = HittableList::new();
    world.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)?);
    world.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center)?);
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)?);
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.4, bubble)?);
    world.add(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, gold)?);

    let look_from = Vec3::new(3.0, 3.0, 2.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);
    let mut camera = Camera::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(20.0, 2.0, (look_from - look_at).length());
    camera.initialize()?;

    Ok(Scene { world, camera })
}

fn cover(rng: &mut dyn RngCore) -> RenderResult<Scene> {
    let mut world = HittableList::new();

    let ground = shared(Lambertian::new(Color::splat(0.5)));
    world.add(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground)?);

    // Every glass sphere shares one material
    let glass = shared(Dielectric::new(1.5)?);
    let clearing = Vec3::new(4.0, 0.2, 0.0);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - clearing).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random_color(rng) * random_color(rng);
                shared(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                let albedo = Color::splat(0.5) + 0.5 * random_color(rng);
                let fuzz = 0.5 * gen_f32(rng);
                shared(Metal::new(albedo, fuzz))
            } else {
                Arc::clone(&glass)
            };
            world.add(Sphere::new(center, 0.2, material)?);
        }
    }

    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)?);
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        shared(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )?);
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        shared(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )?);
    log::debug!("Cover scene has {} spheres", world.len());

    let mut camera = Camera::new()
        .with_aspect_ratio(3.0 / 2.0)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0);
    camera.initialize()?;

    Ok(Scene { world, camera })
}

fn random_color(rng: &mut dyn RngCore) -> Color {
    Color::new(gen_f32(rng), gen_f32(rng), gen_f32(rng))
}
