use bytemuck::{Pod, Zeroable};

/// Flag bits packed into `BodyInstance::flags`.
pub const FLAG_HALO: u32 = 1;
pub const FLAG_RING: u32 = 1 << 1;

/// Per-sphere render data written to the frame buffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub radius: f32,
    /// Spin about local Y in radians.
    pub rotation: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub emissive: f32,
    /// Bitmask of FLAG_* values, stored as a float.
    pub flags: f32,
    /// Ring inner/outer radius (zero when no ring).
    pub ring_inner: f32,
    pub ring_outer: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}

/// A free-floating point (star, particle) in world or camera space.
/// `w` is the point size in world units.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl PointInstance {
    pub const FLOATS: usize = 4;
}

/// Everything the host draws for one frame, apart from the camera.
pub struct RenderBuffer {
    pub instances: Vec<BodyInstance>,
    pub points: Vec<PointInstance>,
    /// Whether `points` should be drawn this frame.
    pub points_visible: bool,
}

impl RenderBuffer {
    pub fn with_capacity(max_instances: usize, max_points: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            points: Vec::with_capacity(max_points),
            points_visible: false,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.points.clear();
        self.points_visible = false;
    }

    pub fn push(&mut self, instance: BodyInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn point_count(&self) -> u32 {
        self.points.len() as u32
    }

    /// Raw pointer to instance data for the host's memory view.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::with_capacity(64, 2048)
    }
}
