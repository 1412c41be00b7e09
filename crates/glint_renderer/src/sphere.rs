//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    ConfigError, Material, Ray,
};
use glint_math::{Interval, Vec3};

/// A sphere primitive.
///
/// The material is shared: several spheres may hold the same `Arc`.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails for a non-finite center or a radius that is not a positive,
    /// finite number.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Result<Self, ConfigError> {
        if !center.is_finite() {
            return Err(ConfigError::InvalidCenter(center));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Both roots of `|O + tD - C|² = r²`, smaller first.
    ///
    /// `None` when the ray misses the sphere. A tangent ray yields the same
    /// root twice.
    pub fn roots(&self, ray: &Ray) -> Option<(f32, f32)> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        Some(((h - sqrtd) / a, (h + sqrtd) / a))
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let (near, far) = self.roots(ray)?;

        // Find the nearest root in the acceptable range
        let root = if ray_t.contains(near) {
            near
        } else if ray_t.contains(far) {
            far
        } else {
            return None;
        };

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}
