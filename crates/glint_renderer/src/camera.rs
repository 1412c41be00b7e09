//! Camera for ray generation.

use crate::{random_in_unit_disk, ConfigError, Ray};
use glint_math::{near_zero, Interval, Vec3};
use rand::RngCore;

/// Camera mapping viewport coordinates to rays.
///
/// With a zero aperture every ray starts at `look_from` (pinhole camera).
/// A positive aperture samples the lens disk, giving depth of field around
/// the plane at `focus_dist`.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,         // Vertical field of view in degrees
    aperture: f32,     // Lens diameter
    focus_dist: f32,   // Distance from camera to plane of perfect focus
    aspect_ratio: f32, // Viewport width / height

    // Cached computed values (set by initialize())
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    ///
    /// Looks down -Z from the origin with a 90 degree field of view and a
    /// 16:9 viewport. Ready to use without calling `initialize`.
    pub fn new() -> Self {
        let mut camera = Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
            aspect_ratio: 16.0 / 9.0,
            origin: Vec3::ZERO,
            lower_left_corner: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        };
        camera.compute();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Validate the settings and recompute the viewport.
    ///
    /// Must be called after any `with_*` builder call.
    pub fn initialize(&mut self) -> Result<(), ConfigError> {
        if !Interval::new(0.0, 180.0).surrounds(self.vfov) {
            return Err(ConfigError::InvalidFov(self.vfov));
        }
        if !(self.aperture >= 0.0 && self.aperture.is_finite()) {
            return Err(ConfigError::InvalidAperture(self.aperture));
        }
        if !(self.focus_dist > 0.0 && self.focus_dist.is_finite()) {
            return Err(ConfigError::InvalidFocusDistance(self.focus_dist));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        let view = self.look_from - self.look_at;
        if near_zero(view) {
            return Err(ConfigError::DegenerateView);
        }
        if near_zero(self.vup.cross(view)) {
            return Err(ConfigError::ParallelUp);
        }

        self.compute();
        Ok(())
    }

    fn compute(&mut self) {
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        // y spans [-tan(θ/2), tan(θ/2)] at unit distance
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        self.origin = self.look_from;
        self.horizontal = self.focus_dist * viewport_width * self.u;
        self.vertical = self.focus_dist * viewport_height * self.v;
        self.lower_left_corner =
            self.origin - self.horizontal / 2.0 - self.vertical / 2.0 - self.focus_dist * self.w;
        self.lens_radius = self.aperture / 2.0;
    }

    /// Generate the ray through viewport coordinates (s, t).
    ///
    /// `s` runs left to right and `t` bottom to top, both over [0, 1].
    /// Lens samples are only drawn when the aperture is open.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let ray_origin = self.origin + offset;
        let ray_direction =
            self.lower_left_corner + s * self.horizontal + t * self.vertical - ray_origin;

        Ray::new(ray_origin, ray_direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_center_ray() {
        let camera = Camera::new();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction().normalize() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_camera_corners() {
        let mut camera = Camera::new().with_aspect_ratio(2.0);
        camera.initialize().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        // 90 degree fov: viewport is 2 high, 4 wide at distance 1
        let lower_left = camera.get_ray(0.0, 0.0, &mut rng).direction();
        let upper_right = camera.get_ray(1.0, 1.0, &mut rng).direction();
        assert!((lower_left - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-5);
        assert!((upper_right - Vec3::new(2.0, 1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_pinhole_camera_uses_no_randomness() {
        let camera = Camera::new();
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        assert_eq!(camera.get_ray(0.3, 0.7, &mut a), camera.get_ray(0.3, 0.7, &mut b));
    }

    #[test]
    fn test_lens_camera_focuses_on_plane() {
        let mut camera = Camera::new()
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .with_lens(40.0, 0.5, 5.0);
        camera.initialize().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        // Every lens sample through the same pixel converges on the focus plane
        let focus_point = {
            let r = camera.get_ray(0.25, 0.75, &mut rng);
            r.at(1.0)
        };
        for _ in 0..50 {
            let r = camera.get_ray(0.25, 0.75, &mut rng);
            assert!((r.origin() - Vec3::new(0.0, 0.0, 5.0)).length() <= 0.25 + 1e-5);
            assert!((r.at(1.0) - focus_point).length() < 1e-4);
        }
    }

    #[test]
    fn test_camera_rejects_bad_settings() {
        let mut camera = Camera::new().with_position(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert_eq!(camera.initialize(), Err(ConfigError::DegenerateView));

        let mut camera = Camera::new().with_position(Vec3::ZERO, Vec3::Y, Vec3::Y);
        assert_eq!(camera.initialize(), Err(ConfigError::ParallelUp));

        let mut camera = Camera::new().with_lens(180.0, 0.0, 1.0);
        assert_eq!(camera.initialize(), Err(ConfigError::InvalidFov(180.0)));

        let mut camera = Camera::new().with_lens(60.0, -1.0, 1.0);
        assert_eq!(camera.initialize(), Err(ConfigError::InvalidAperture(-1.0)));

        let mut camera = Camera::new().with_lens(60.0, 0.0, 0.0);
        assert_eq!(camera.initialize(), Err(ConfigError::InvalidFocusDistance(0.0)));

        let mut camera = Camera::new().with_aspect_ratio(0.0);
        assert_eq!(camera.initialize(), Err(ConfigError::InvalidAspectRatio(0.0)));
    }
}
