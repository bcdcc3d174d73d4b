/// Circular orbit in the ecliptic (X/Z) plane. Pure math, no engine state.
///
/// Every consumer in a frame (body placement, camera rig, hit-testing) must be
/// handed the same `time`, otherwise the camera chases a stale position.

use glam::Vec3;

/// Position of a body on a circular orbit of `radius` around the origin.
/// The orbital plane is fixed: Y is always zero.
#[inline]
pub fn orbit_position(time: f32, angular_speed: f32, phase: f32, radius: f32) -> Vec3 {
    let angle = time * angular_speed + phase;
    Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}
