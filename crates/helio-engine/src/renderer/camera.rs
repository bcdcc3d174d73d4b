use glam::{Mat4, Vec2, Vec3};

/// Smallest polar angle allowed by orbit rotation (keeps the view off the poles).
const POLAR_EPSILON: f32 = 1e-3;

/// Perspective camera with orbit-style controls around a focus point.
///
/// User input (`rotate`, `dolly`, `pan`) is ignored while `controls_enabled`
/// is false; scripted code may still move `position` and `target` directly.
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Camera position in world space.
    pub position: Vec3,
    /// Orbit focus point; the camera always looks at it.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport size in world units (pointer coordinates use the same space).
    pub width: f32,
    pub height: f32,
    pub near: f32,
    pub far: f32,
    /// Allowed camera-to-target distance range while controls are enabled.
    pub min_distance: f32,
    pub max_distance: f32,
    pub controls_enabled: bool,
    /// Radians of rotation per world unit of pointer drag.
    pub rotate_speed: f32,
}

impl Camera3D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            fov_y: 45f32.to_radians(),
            width,
            height,
            near: 0.1,
            far: 2000.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            controls_enabled: true,
            rotate_speed: 0.005,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Resize the viewport (e.g. on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Distance from the camera to its focus point.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Set the allowed zoom range. An inverted range collapses to `min`.
    pub fn set_distance_range(&mut self, min: f32, max: f32) {
        self.min_distance = min;
        self.max_distance = max.max(min);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Orbit around the target by azimuth/polar deltas in radians.
    pub fn rotate(&mut self, d_azimuth: f32, d_polar: f32) {
        if !self.controls_enabled {
            return;
        }
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius < 1e-6 {
            return;
        }
        let azimuth = offset.x.atan2(offset.z) + d_azimuth;
        let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() + d_polar)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);
        self.position = self.target
            + Vec3::new(
                radius * polar.sin() * azimuth.sin(),
                radius * polar.cos(),
                radius * polar.sin() * azimuth.cos(),
            );
    }

    /// Orbit in response to a pointer drag of `delta` world units.
    pub fn drag_rotate(&mut self, delta: Vec2) {
        self.rotate(-delta.x * self.rotate_speed, -delta.y * self.rotate_speed);
    }

    /// Scale the camera-to-target distance (< 1 zooms in), respecting the range.
    pub fn dolly(&mut self, scale: f32) {
        if !self.controls_enabled || !(scale.is_finite() && scale > 0.0) {
            return;
        }
        let offset = self.position - self.target;
        let radius = (offset.length() * scale).clamp(self.min_distance, self.max_distance);
        self.position = self.target + offset.normalize_or_zero() * radius;
    }

    /// Translate camera and target together in the view plane.
    pub fn pan(&mut self, delta: Vec2) {
        if !self.controls_enabled {
            return;
        }
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        // Scale so a drag across the full viewport height spans the visible frustum.
        let units_per_px = 2.0 * self.distance() * (self.fov_y / 2.0).tan() / self.height;
        let shift = (-right * delta.x + up * delta.y) * units_per_px;
        self.position += shift;
        self.target += shift;
    }

    /// Per-frame constraint pass: clamp the zoom range while the user is in control.
    pub fn update(&mut self) {
        if !self.controls_enabled {
            return;
        }
        let offset = self.position - self.target;
        let radius = offset.length();
        let clamped = radius.clamp(self.min_distance, self.max_distance);
        if (clamped - radius).abs() > f32::EPSILON && radius > 1e-6 {
            self.position = self.target + offset * (clamped / radius);
        }
    }

    /// Project a world point to viewport coordinates (origin top-left, Y down).
    /// Returns the screen point and its view-space depth, or None when behind the camera.
    pub fn project(&self, world: Vec3) -> Option<(Vec2, f32)> {
        let depth = (world - self.position).dot((self.target - self.position).normalize_or_zero());
        if depth <= self.near {
            return None;
        }
        let ndc = self.view_projection().project_point3(world);
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        );
        Some((screen, depth))
    }

    /// On-screen radius of a sphere of `radius` world units at view depth `depth`.
    pub fn projected_radius(&self, radius: f32, depth: f32) -> f32 {
        radius / (depth * (self.fov_y / 2.0).tan()) * (self.height / 2.0)
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(1600.0, 900.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-3
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let cam = Camera3D::new(800.0, 600.0).with_position(Vec3::new(0.0, 80.0, 120.0));
        let (screen, depth) = cam.project(Vec3::ZERO).unwrap();
        assert!((screen.x - 400.0).abs() < 1e-2 && (screen.y - 300.0).abs() < 1e-2, "{screen:?}");
        assert!((depth - cam.distance()).abs() < 1e-3);
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let cam = Camera3D::new(800.0, 600.0).with_position(Vec3::new(0.0, 0.0, 10.0));
        assert!(cam.project(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn rotate_preserves_distance() {
        let mut cam = Camera3D::default().with_position(Vec3::new(0.0, 80.0, 120.0));
        let before = cam.distance();
        cam.rotate(0.7, -0.3);
        assert!((cam.distance() - before).abs() < 1e-3);
        assert!(!approx(cam.position, Vec3::new(0.0, 80.0, 120.0)));
    }

    #[test]
    fn disabled_controls_ignore_user_input() {
        let mut cam = Camera3D::default().with_position(Vec3::new(0.0, 0.0, 50.0));
        cam.controls_enabled = false;
        cam.rotate(1.0, 1.0);
        cam.dolly(0.5);
        cam.pan(Vec2::new(30.0, 30.0));
        assert!(approx(cam.position, Vec3::new(0.0, 0.0, 50.0)));
        assert!(approx(cam.target, Vec3::ZERO));
    }

    #[test]
    fn dolly_respects_distance_range() {
        let mut cam = Camera3D::default().with_position(Vec3::new(0.0, 0.0, 50.0));
        cam.set_distance_range(20.0, 500.0);
        cam.dolly(0.01);
        assert!((cam.distance() - 20.0).abs() < 1e-3);
        cam.dolly(1000.0);
        assert!((cam.distance() - 500.0).abs() < 1e-2);
    }

    #[test]
    fn update_clamps_only_when_enabled() {
        let mut cam = Camera3D::default().with_position(Vec3::new(0.0, 0.0, 100.0));
        cam.set_distance_range(2.0, 30.0);
        cam.controls_enabled = false;
        cam.update();
        assert!((cam.distance() - 100.0).abs() < 1e-3);
        cam.controls_enabled = true;
        cam.update();
        assert!((cam.distance() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn pan_moves_target_with_camera() {
        let mut cam = Camera3D::default().with_position(Vec3::new(0.0, 0.0, 50.0));
        cam.pan(Vec2::new(100.0, 0.0));
        assert!((cam.distance() - 50.0).abs() < 1e-3);
        assert!(cam.target.x < 0.0);
    }
}
