/// Camera rig: overview, planet follow, and the scripted warp flight.
///
/// The rig owns no camera; it nudges the engine's `Camera3D` once per tick
/// according to the current `Focus`.

use glam::Vec3;
use helio_engine::{lerp_vec3, move_towards, Camera3D, Rng};
use serde::Deserialize;

use crate::bodies::PLANETS;
use crate::selection::Focus;

/// Tuning constants for every rig mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Per-tick easing of the orbit target toward its goal.
    pub target_ease: f32,
    /// Per-tick easing of the camera toward its goal position.
    pub camera_ease: f32,

    // Overview
    pub idle_min_distance: f32,
    pub idle_max_distance: f32,
    /// Closer than this to the origin, the idle camera pulls back home.
    pub pullback_radius: f32,
    pub home: [f32; 3],

    // Observing
    pub follow_radius_scale: f32,
    pub follow_radius_pad: f32,
    /// Follow kicks in once the camera is this many follow radii away.
    pub follow_slack: f32,
    pub zoom_min_scale: f32,
    pub zoom_max_scale: f32,

    // Travel
    pub stop_radius_scale: f32,
    pub stop_radius_pad: f32,
    /// Speed cap per unit of travel multiplier.
    pub max_speed: f32,
    pub base_gain: f32,
    pub gain_per_speed: f32,
    /// Minimum speed per unit of travel multiplier.
    pub min_speed: f32,
    /// Warp shows when the step exceeds `warp_step * dt` ...
    pub warp_step: f32,
    /// ... and the target is farther than this.
    pub warp_distance: f32,
    /// Camera shake per axis per unit of travel multiplier.
    pub jitter: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            target_ease: 0.1,
            camera_ease: 0.05,
            idle_min_distance: 20.0,
            idle_max_distance: 500.0,
            pullback_radius: 60.0,
            home: [0.0, 80.0, 120.0],
            follow_radius_scale: 8.0,
            follow_radius_pad: 5.0,
            follow_slack: 1.5,
            zoom_min_scale: 2.0,
            zoom_max_scale: 20.0,
            stop_radius_scale: 5.0,
            stop_radius_pad: 5.0,
            max_speed: 100.0,
            base_gain: 2.0,
            gain_per_speed: 0.5,
            min_speed: 5.0,
            warp_step: 10.0,
            warp_distance: 50.0,
            jitter: 0.1,
        }
    }
}

impl RigConfig {
    pub fn home(&self) -> Vec3 {
        Vec3::from_array(self.home)
    }

    /// Arrival radius around a planet of `radius`.
    pub fn stop_distance(&self, radius: f32) -> f32 {
        radius * self.stop_radius_scale + self.stop_radius_pad
    }

    /// Preferred viewing distance when observing a planet of `radius`.
    pub fn follow_distance(&self, radius: f32) -> f32 {
        radius * self.follow_radius_scale + self.follow_radius_pad
    }
}

/// What happened to the camera this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigOutcome {
    /// Travel reached the stop distance this tick.
    pub arrived: bool,
    pub warp: bool,
    /// Distance to the travel target after the move (0 outside travel).
    pub distance: f32,
}

#[derive(Debug, Clone, Default)]
pub struct CameraRig {
    config: RigConfig,
}

impl CameraRig {
    pub fn new(config: RigConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// One tick of camera motion. `t` is simulation time, `dt` the fixed
    /// step, `multiplier` the user's travel speed.
    pub fn update(
        &self,
        camera: &mut Camera3D,
        focus: Focus,
        t: f32,
        multiplier: f32,
        dt: f32,
        rng: &mut Rng,
    ) -> RigOutcome {
        match focus {
            Focus::Traveling { target } if target < PLANETS.len() => {
                self.travel(camera, target, t, multiplier, dt, rng)
            }
            Focus::Observing(body) if body < PLANETS.len() => {
                self.observe(camera, body, t);
                RigOutcome::default()
            }
            _ => {
                self.overview(camera);
                RigOutcome::default()
            }
        }
    }

    fn overview(&self, camera: &mut Camera3D) {
        let c = &self.config;
        camera.controls_enabled = true;
        camera.target = lerp_vec3(camera.target, Vec3::ZERO, c.target_ease);
        camera.set_distance_range(c.idle_min_distance, c.idle_max_distance);
        if camera.position.length() < c.pullback_radius {
            camera.position = lerp_vec3(camera.position, c.home(), c.camera_ease);
        }
    }

    fn observe(&self, camera: &mut Camera3D, body: usize, t: f32) {
        let c = &self.config;
        let planet = &PLANETS[body];
        let pos = planet.position(t);

        camera.controls_enabled = true;
        camera.target = lerp_vec3(camera.target, pos, c.target_ease);
        camera.set_distance_range(
            planet.radius * c.zoom_min_scale,
            planet.radius * c.zoom_max_scale,
        );

        let dist = c.follow_distance(planet.radius);
        if camera.position.distance(pos) > dist * c.follow_slack {
            let goal = pos + (camera.position - pos).normalize_or_zero() * dist;
            camera.position = lerp_vec3(camera.position, goal, c.camera_ease);
        }
    }

    fn travel(
        &self,
        camera: &mut Camera3D,
        target: usize,
        t: f32,
        multiplier: f32,
        dt: f32,
        rng: &mut Rng,
    ) -> RigOutcome {
        let c = &self.config;
        let planet = &PLANETS[target];
        let pos = planet.position(t);
        let to_target = pos - camera.position;
        let distance = to_target.length();
        let stop = c.stop_distance(planet.radius);

        camera.target = lerp_vec3(camera.target, pos, c.target_ease);

        if distance <= stop {
            // Hand control back with the destination's zoom range already in place.
            camera.set_distance_range(
                planet.radius * c.zoom_min_scale,
                planet.radius * c.zoom_max_scale,
            );
            camera.controls_enabled = true;
            return RigOutcome {
                arrived: true,
                warp: false,
                distance,
            };
        }
        camera.controls_enabled = false;

        let m = multiplier;
        let gain = c.base_gain + m * c.gain_per_speed;
        let step = (distance.min(c.max_speed * m) * gain * dt).max(c.min_speed * m * dt);
        let mut next = move_towards(camera.position, pos, step);

        let warp = step > c.warp_step * dt && distance > c.warp_distance;
        if warp {
            let dir = to_target / distance;
            let amp = 2.0 * c.jitter * m;
            let shake = Vec3::new(rng.centered(), rng.centered(), rng.centered()) * amp;
            // Sideways only: the shake must never undo forward progress.
            next += shake - dir * shake.dot(dir);
        }
        camera.position = next;

        RigOutcome {
            arrived: false,
            warp,
            distance: camera.position.distance(pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, PLANET_COUNT};

    const DT: f32 = 1.0 / 60.0;

    fn home_camera() -> Camera3D {
        Camera3D::default().with_position(Vec3::new(0.0, 80.0, 120.0))
    }

    /// Flies to `target` with the simulation running at real time and returns
    /// the number of ticks until arrival.
    fn fly(target: usize, multiplier: f32) -> usize {
        let rig = CameraRig::default();
        let mut camera = home_camera();
        let mut rng = Rng::new(7);
        let focus = Focus::Traveling { target };
        let mut t = 0.0;
        let mut last = f32::INFINITY;
        for tick in 0..20_000 {
            let out = rig.update(&mut camera, focus, t, multiplier, DT, &mut rng);
            if out.arrived {
                let stop = rig.config().stop_distance(PLANETS[target].radius);
                assert!(out.distance <= stop);
                return tick;
            }
            assert!(!camera.controls_enabled);
            assert!(
                out.distance < last,
                "distance regressed at tick {tick}: {} >= {last} (m={multiplier})",
                out.distance
            );
            last = out.distance;
            t += DT;
        }
        panic!("travel to {target} at speed {multiplier} never arrived");
    }

    #[test]
    fn travel_terminates_for_every_multiplier() {
        for step in 1..=10 {
            let m = step as f32 * 0.5;
            for target in 0..PLANET_COUNT {
                fly(target, m);
            }
        }
    }

    #[test]
    fn faster_multiplier_arrives_sooner() {
        assert!(fly(EARTH, 5.0) < fly(EARTH, 0.5));
    }

    #[test]
    fn earth_travel_arrives_once_within_stop_distance() {
        let rig = CameraRig::default();
        let mut camera = home_camera();
        let mut rng = Rng::new(42);
        let focus = Focus::Traveling { target: EARTH };
        let stop = PLANETS[EARTH].radius * 5.0 + 5.0;
        let mut t = 0.0;
        let mut arrivals = 0;
        for _ in 0..5_000 {
            let before = camera.position.distance(PLANETS[EARTH].position(t));
            let out = rig.update(&mut camera, focus, t, 1.0, DT, &mut rng);
            if out.arrived {
                assert!(before <= stop, "arrived early at {before}");
                arrivals += 1;
                break;
            }
            assert!(before > stop);
            t += DT;
        }
        assert_eq!(arrivals, 1);
        assert!(camera.controls_enabled);
    }

    #[test]
    fn warp_only_far_from_target() {
        let rig = CameraRig::default();
        let mut camera = home_camera();
        let mut rng = Rng::new(1);
        let out = rig.update(
            &mut camera,
            Focus::Traveling { target: EARTH },
            0.0,
            1.0,
            DT,
            &mut rng,
        );
        assert!(out.warp);

        let pos = PLANETS[EARTH].position(0.0);
        camera.position = pos + Vec3::new(0.0, 0.0, 30.0);
        let out = rig.update(
            &mut camera,
            Focus::Traveling { target: EARTH },
            0.0,
            1.0,
            DT,
            &mut rng,
        );
        assert!(!out.warp);
        assert!(!out.arrived);
    }

    #[test]
    fn overview_pulls_camera_home_and_recenters() {
        let rig = CameraRig::default();
        let mut camera = Camera3D::default().with_position(Vec3::new(10.0, 10.0, 10.0));
        camera.target = Vec3::new(30.0, 0.0, 0.0);
        let mut rng = Rng::new(1);
        for _ in 0..300 {
            rig.update(&mut camera, Focus::Idle, 0.0, 1.0, DT, &mut rng);
        }
        assert!(camera.position.length() >= 60.0 - 1.0);
        assert!(camera.target.length() < 1e-3);
        assert_eq!(camera.min_distance, 20.0);
        assert_eq!(camera.max_distance, 500.0);
    }

    #[test]
    fn observing_follows_the_planet() {
        let rig = CameraRig::default();
        let mut camera = home_camera();
        let mut rng = Rng::new(1);
        for _ in 0..600 {
            rig.update(&mut camera, Focus::Observing(EARTH), 0.0, 1.0, DT, &mut rng);
        }
        let pos = PLANETS[EARTH].position(0.0);
        let follow = rig.config().follow_distance(PLANETS[EARTH].radius);
        assert!(camera.position.distance(pos) <= follow * 1.5 + 1e-3);
        assert!(camera.target.distance(pos) < 1e-3);
        assert!((camera.min_distance - 3.2).abs() < 1e-5);
        assert!((camera.max_distance - 32.0).abs() < 1e-4);
    }

    #[test]
    fn config_overrides_merge_with_defaults() {
        let cfg: RigConfig = serde_json::from_str(r#"{"max_speed": 50.0}"#).unwrap();
        assert_eq!(cfg.max_speed, 50.0);
        assert_eq!(cfg.home(), Vec3::new(0.0, 80.0, 120.0));
    }
}
