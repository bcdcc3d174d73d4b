/// Linear RGB color, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional). Returns None on malformed input.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)? as f32 / 255.0,
            g: channel(2)? as f32 / 255.0,
            b: channel(4)? as f32 / 255.0,
        })
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// Flat ring around a sphere, inner/outer radius in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingMesh {
    pub inner: f32,
    pub outer: f32,
}

/// Sphere drawn by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereMesh {
    pub radius: f32,
    pub color: Rgb,
    /// Glow multiplier (0.0 = lit only by scene lights).
    pub emissive: f32,
    /// Draw a wireframe halo shell around the sphere.
    pub halo: bool,
    pub ring: Option<RingMesh>,
}

impl Default for SphereMesh {
    fn default() -> Self {
        Self {
            radius: 1.0,
            color: Rgb::default(),
            emissive: 0.0,
            halo: false,
            ring: None,
        }
    }
}

impl SphereMesh {
    pub fn new(radius: f32, color: Rgb) -> Self {
        Self {
            radius,
            color,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_ring(mut self, ring: RingMesh) -> Self {
        self.ring = Some(ring);
        self
    }
}
