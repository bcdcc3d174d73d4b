/// Warp tunnel: a cylinder of streaking stars shown during fast travel.
///
/// Star coordinates are camera-local (Z toward the viewer); the host
/// attaches the point cloud to its camera.

use std::f32::consts::TAU;

use helio_engine::{PointInstance, RenderBuffer, Rng};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WarpConfig {
    pub star_count: usize,
    pub inner_radius: f32,
    pub radius_spread: f32,
    /// Length of the tunnel along Z, centered on the camera.
    pub depth: f32,
    /// Star speed toward the viewer, units per second.
    pub speed: f32,
    /// Stars past this Z wrap back by `depth`.
    pub recycle_z: f32,
    /// Tunnel roll, radians per second.
    pub roll_speed: f32,
    /// Point size written into each star's `w`.
    pub star_size: f32,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            star_count: 2000,
            inner_radius: 20.0,
            radius_spread: 50.0,
            depth: 400.0,
            speed: 200.0,
            recycle_z: 100.0,
            roll_speed: 0.5,
            star_size: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Star {
    radius: f32,
    angle: f32,
    z: f32,
}

pub struct WarpTunnel {
    config: WarpConfig,
    stars: Vec<Star>,
    roll: f32,
    active: bool,
}

impl WarpTunnel {
    pub fn new(config: WarpConfig, rng: &mut Rng) -> Self {
        let stars = (0..config.star_count)
            .map(|_| Star {
                radius: config.inner_radius + rng.next_f32() * config.radius_spread,
                angle: rng.next_f32() * TAU,
                z: rng.centered() * config.depth,
            })
            .collect();
        Self {
            config,
            stars,
            roll: 0.0,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    /// Advance the streak animation. Frozen while inactive.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let advance = self.config.speed * dt;
        for star in &mut self.stars {
            star.z += advance;
            if star.z > self.config.recycle_z {
                star.z -= self.config.depth;
            }
        }
        self.roll = (self.roll + self.config.roll_speed * dt) % TAU;
    }

    /// Write star positions into the point section (nothing while hidden).
    pub fn write_points(&self, buffer: &mut RenderBuffer, capacity: usize) {
        if !self.active {
            return;
        }
        buffer.points_visible = true;
        let room = capacity.saturating_sub(buffer.points.len());
        buffer.points.extend(self.stars.iter().take(room).map(|s| {
            let a = s.angle + self.roll;
            PointInstance {
                x: s.radius * a.cos(),
                y: s.radius * a.sin(),
                z: s.z,
                w: self.config.star_size,
            }
        }));
    }
}
