// extensions/easing.rs
//
// Interpolation helpers for per-frame camera and body motion.
// No dependencies on Entity/Scene, just math.

use glam::Vec3;

/// Linearly interpolate between two Vec3 values.
/// Called once per frame with a constant `t`, this gives exponential ease-out.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Move `from` toward `to` by at most `max_step`, never passing `to`.
#[inline]
pub fn move_towards(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_step || dist < 1e-6 {
        to
    } else {
        from + delta / dist * max_step
    }
}
