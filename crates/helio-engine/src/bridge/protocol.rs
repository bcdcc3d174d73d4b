/// Frame buffer layout shared with the TypeScript host.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 24 floats]
/// [Bodies: max_instances × 12 floats]
/// [Points: max_points × 4 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::{BodyInstance, PointInstance, RenderBuffer};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 24;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_POINTS: usize = 4;
pub const HEADER_POINT_COUNT: usize = 5;
pub const HEADER_POINTS_VISIBLE: usize = 6;
pub const HEADER_MAX_EVENTS: usize = 7;
pub const HEADER_EVENT_COUNT: usize = 8;
pub const HEADER_VIEWPORT_WIDTH: usize = 9;
pub const HEADER_VIEWPORT_HEIGHT: usize = 10;
/// Camera position x, y, z.
pub const HEADER_CAMERA_POSITION: usize = 11;
/// Camera target x, y, z.
pub const HEADER_CAMERA_TARGET: usize = 14;
pub const HEADER_CAMERA_FOV: usize = 17;
pub const HEADER_CONTROLS_ENABLED: usize = 18;
pub const HEADER_CAMERA_MIN_DISTANCE: usize = 19;
pub const HEADER_CAMERA_MAX_DISTANCE: usize = 20;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_points: usize,
    pub max_events: usize,

    /// Offset (in floats) where body data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where point data begins.
    pub point_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_points: usize, max_events: usize) -> Self {
        let instance_data_offset = HEADER_FLOATS;
        let point_data_offset = instance_data_offset + max_instances * BodyInstance::FLOATS;
        let event_data_offset = point_data_offset + max_points * PointInstance::FLOATS;
        let buffer_total_floats = event_data_offset + max_events * GameEvent::FLOATS;

        Self {
            max_instances,
            max_points,
            max_events,
            instance_data_offset,
            point_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_points, config.max_events)
    }

    /// Fill the header for one frame. Counts are clamped to the capacities,
    /// matching how many records the host may read.
    pub fn write_header(
        &self,
        header: &mut [f32; HEADER_FLOATS],
        frame_counter: u32,
        buffer: &RenderBuffer,
        event_count: usize,
        camera: &Camera3D,
    ) {
        header.fill(0.0);
        header[HEADER_FRAME_COUNTER] = frame_counter as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = buffer.instances.len().min(self.max_instances) as f32;
        header[HEADER_MAX_POINTS] = self.max_points as f32;
        header[HEADER_POINT_COUNT] = buffer.points.len().min(self.max_points) as f32;
        header[HEADER_POINTS_VISIBLE] = if buffer.points_visible { 1.0 } else { 0.0 };
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = event_count.min(self.max_events) as f32;
        header[HEADER_VIEWPORT_WIDTH] = camera.width;
        header[HEADER_VIEWPORT_HEIGHT] = camera.height;
        header[HEADER_CAMERA_POSITION..HEADER_CAMERA_POSITION + 3]
            .copy_from_slice(&camera.position.to_array());
        header[HEADER_CAMERA_TARGET..HEADER_CAMERA_TARGET + 3]
            .copy_from_slice(&camera.target.to_array());
        header[HEADER_CAMERA_FOV] = camera.fov_y;
        header[HEADER_CONTROLS_ENABLED] = if camera.controls_enabled { 1.0 } else { 0.0 };
        header[HEADER_CAMERA_MIN_DISTANCE] = camera.min_distance;
        // Infinity is not representable for every JS consumer; cap it.
        header[HEADER_CAMERA_MAX_DISTANCE] = camera.max_distance.min(f32::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 2000, 32);

        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.point_data_offset, HEADER_FLOATS + 10 * 12);
        assert_eq!(layout.event_data_offset, layout.point_data_offset + 2000 * 4);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn from_default_config() {
        let config = GameConfig::default();
        let layout = ProtocolLayout::from_config(&config);
        assert_eq!(layout.max_instances, config.max_instances);
        assert_eq!(layout.max_points, config.max_points);
        assert_eq!(layout.max_events, config.max_events);
    }

    #[test]
    fn header_carries_camera_pose_and_clamped_counts() {
        let layout = ProtocolLayout::new(1, 4, 2);
        let mut buffer = RenderBuffer::default();
        buffer.push(BodyInstance::default());
        buffer.push(BodyInstance::default());
        buffer.points_visible = true;
        let mut camera = Camera3D::new(800.0, 600.0).with_position(Vec3::new(0.0, 80.0, 120.0));
        camera.controls_enabled = false;

        let mut header = [0.0; HEADER_FLOATS];
        layout.write_header(&mut header, 7, &buffer, 5, &camera);

        assert_eq!(header[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(header[HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(header[HEADER_EVENT_COUNT], 2.0);
        assert_eq!(header[HEADER_POINTS_VISIBLE], 1.0);
        assert_eq!(header[HEADER_CAMERA_POSITION + 1], 80.0);
        assert_eq!(header[HEADER_CAMERA_POSITION + 2], 120.0);
        assert_eq!(header[HEADER_CONTROLS_ENABLED], 0.0);
    }
}
