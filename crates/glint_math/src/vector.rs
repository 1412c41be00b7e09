//! Vector helpers shared by the materials.

use crate::Vec3;

/// Per-component threshold below which a direction counts as degenerate.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// True if every component of `v` is within [`NEAR_ZERO_EPSILON`] of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO_EPSILON
}

/// Reflect `v` about the normal `n`: `v - 2·dot(v, n)·n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of the refractive index on the incoming
/// side to the one on the transmitted side. The result is split into the
/// components perpendicular and parallel to the normal.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
