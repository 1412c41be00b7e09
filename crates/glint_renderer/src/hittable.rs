//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray, Sphere};
use glint_math::{Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material of the primitive that was hit
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal.
    ///
    /// The stored normal is flipped when needed so that it always opposes
    /// the ray; `front_face` remembers which side was hit.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection of `ray` with this object within the closed
    /// range `ray_t`, if any.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

/// A flat list of primitives, searched linearly.
pub struct HittableList<H = Sphere> {
    objects: Vec<H>,
}

impl<H: Hittable> HittableList<H> {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: H) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the contained objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.objects.iter()
    }
}

impl<H: Hittable> Default for HittableList<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hittable> FromIterator<H> for HittableList<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl<H: Hittable> Hittable for HittableList<H> {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;

        for object in &self.objects {
            // Later objects replace the current hit when closer or tied
            let interval = closest.map_or(ray_t, |rec| ray_t.with_max(rec.t));
            if let Some(rec) = object.hit(ray, interval) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Metal};
    use std::sync::Arc;

    fn sphere_at(z: f32, material: &Arc<Material>) -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, z), 0.5, Arc::clone(material)).unwrap()
    }

    #[test]
    fn test_nearest_hit_independent_of_order() {
        let near_mat = Arc::new(Material::from(Lambertian::new(Vec3::new(1.0, 0.0, 0.0))));
        let far_mat = Arc::new(Material::from(Metal::new(Vec3::new(0.0, 1.0, 0.0), 0.0)));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let interval = Interval::new(0.001, f32::INFINITY);

        // Overlapping spheres along -Z: near surface at t=0.5, far at t=0.8
        let orders = [
            vec![sphere_at(-1.0, &near_mat), sphere_at(-1.3, &far_mat)],
            vec![sphere_at(-1.3, &far_mat), sphere_at(-1.0, &near_mat)],
        ];

        for spheres in orders {
            let world: HittableList = spheres.into_iter().collect();
            let rec = world.hit(&ray, interval).expect("ray should hit");
            assert!((rec.t - 0.5).abs() < 1e-5, "t = {}", rec.t);
            assert!(std::ptr::eq(rec.material, near_mat.as_ref()));
        }
    }

    #[test]
    fn test_empty_list_misses() {
        let world: HittableList = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(world.is_empty());
        assert!(world.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_face_normal_opposes_ray() {
        let material = Material::from(Lambertian::new(Vec3::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let front = HitRecord::new(&ray, 1.0, Vec3::Z, &material);
        assert!(front.front_face);
        assert_eq!(front.normal, Vec3::Z);

        let back = HitRecord::new(&ray, 1.0, Vec3::NEG_Z, &material);
        assert!(!back.front_face);
        assert_eq!(back.normal, Vec3::Z);
        assert!(ray.direction().dot(back.normal) <= 0.0);
    }

    #[test]
    fn test_tied_hit_goes_to_last_inserted() {
        let first = Arc::new(Material::from(Lambertian::new(Vec3::new(1.0, 0.0, 0.0))));
        let second = Arc::new(Material::from(Lambertian::new(Vec3::new(0.0, 0.0, 1.0))));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let world: HittableList = [sphere_at(-1.0, &first), sphere_at(-1.0, &second)]
            .into_iter()
            .collect();
        let rec = world
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray should hit");
        assert_eq!(rec.t, 0.5);
        assert!(std::ptr::eq(rec.material, second.as_ref()));
    }

    #[test]
    fn test_list_len() {
        let material = Arc::new(Material::from(Lambertian::new(Vec3::ONE)));
        let mut world = HittableList::new();
        assert!(world.is_empty());
        world.add(sphere_at(-1.0, &material));
        world.add(sphere_at(-3.0, &material));
        assert_eq!(world.len(), 2);
        assert_eq!(world.iter().count(), 2);
    }
}
