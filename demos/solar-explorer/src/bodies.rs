/// Body catalog: the sun and the eight planets.
///
/// Scales are chosen for readability, not astronomy: distances, radii and
/// angular speeds are relative screen units. Display names carry the Chinese
/// name with the English name in parentheses.

use glam::Vec3;
use helio_engine::Rgb;
use serde::Serialize;

use crate::orbit::orbit_position;

/// Planet index constants (catalog order = menu order).
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLANET_COUNT: usize = 8;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 6.0;
pub const SUN_COLOR: &str = "#FFD700";
pub const SUN_EMISSIVE: f32 = 1.0;
/// Sun spin per frame (radians).
pub const SUN_SPIN: f32 = 0.002;

// ── Planets ──────────────────────────────────────────────────────────

/// Planet spin per frame (radians).
pub const PLANET_SPIN: f32 = 0.01;
pub const EMISSIVE_IDLE: f32 = 0.2;
pub const EMISSIVE_HIGHLIGHT: f32 = 0.6;
/// Ring inner/outer radius as multiples of the planet radius.
pub const RING_INNER: f32 = 1.4;
pub const RING_OUTER: f32 = 2.5;

/// One planet. Immutable for the lifetime of the process.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    pub id: &'static str,
    /// Display name, `"中文名 (English)"`.
    pub name: &'static str,
    /// Hex color, `#RRGGBB`.
    pub color: &'static str,
    /// Visual radius.
    pub radius: f32,
    /// Orbital radius.
    pub distance: f32,
    /// Angular speed in radians per simulation second.
    pub speed: f32,
    /// Orbital phase at simulation time zero (radians).
    pub start_angle: f32,
    pub description: &'static str,
    pub has_ring: bool,
}

impl CelestialBody {
    /// Live position at simulation time `t`.
    pub fn position(&self, t: f32) -> Vec3 {
        orbit_position(t, self.speed, self.start_angle, self.distance)
    }

    /// Name before the parenthesized alternate, e.g. "地球".
    pub fn short_name(&self) -> &'static str {
        self.name.split(" (").next().unwrap_or(self.name)
    }

    /// Parenthesized alternate name, e.g. "Earth".
    pub fn alt_name(&self) -> Option<&'static str> {
        let start = self.name.find('(')?;
        let end = self.name.rfind(')')?;
        (end > start).then(|| &self.name[start + 1..end])
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::from_hex(self.color).unwrap_or_default()
    }
}

pub const PLANETS: [CelestialBody; PLANET_COUNT] = [
    CelestialBody {
        id: "mercury",
        name: "水星 (Mercury)",
        color: "#A0AEC0",
        radius: 0.8,
        distance: 14.0,
        speed: 0.8,
        start_angle: 0.0,
        description: "太阳系中最小的行星，也是最接近太阳的行星。",
        has_ring: false,
    },
    CelestialBody {
        id: "venus",
        name: "金星 (Venus)",
        color: "#ECC94B",
        radius: 1.5,
        distance: 22.0,
        speed: 0.6,
        start_angle: 2.0,
        description: "太阳系中第二颗行星，是夜空中亮度仅次于月球的天体。",
        has_ring: false,
    },
    CelestialBody {
        id: "earth",
        name: "地球 (Earth)",
        color: "#4299E1",
        radius: 1.6,
        distance: 32.0,
        speed: 0.4,
        start_angle: 4.0,
        description: "我们的家园，目前已知唯一孕育生命的星球。",
        has_ring: false,
    },
    CelestialBody {
        id: "mars",
        name: "火星 (Mars)",
        color: "#F56565",
        radius: 1.2,
        distance: 42.0,
        speed: 0.3,
        start_angle: 1.5,
        description: "被称为红色星球，地表覆盖着氧化铁。",
        has_ring: false,
    },
    CelestialBody {
        id: "jupiter",
        name: "木星 (Jupiter)",
        color: "#ED8936",
        radius: 3.8,
        distance: 60.0,
        speed: 0.15,
        start_angle: 0.5,
        description: "太阳系中最大的行星，是一颗巨大的气态巨行星。",
        has_ring: false,
    },
    CelestialBody {
        id: "saturn",
        name: "土星 (Saturn)",
        color: "#F6E05E",
        radius: 3.2,
        distance: 80.0,
        speed: 0.1,
        start_angle: 5.0,
        description: "以其壮观的行星环系统而闻名。",
        has_ring: true,
    },
    CelestialBody {
        id: "uranus",
        name: "天王星 (Uranus)",
        color: "#4FD1C5",
        radius: 2.4,
        distance: 95.0,
        speed: 0.07,
        start_angle: 3.0,
        description: "太阳系中最冷的行星，拥有独特的侧躺自转轴。",
        has_ring: false,
    },
    CelestialBody {
        id: "neptune",
        name: "海王星 (Neptune)",
        color: "#667EEA",
        radius: 2.3,
        distance: 110.0,
        speed: 0.05,
        start_angle: 1.0,
        description: "太阳系最外侧的行星，以强烈的风暴著称。",
        has_ring: false,
    },
];

/// Catalog index of the planet with identifier `id`.
pub fn index_of(id: &str) -> Option<usize> {
    PLANETS.iter().position(|p| p.id == id)
}

/// Map a float index from a host event to a catalog index.
pub fn index_from_event(value: f32) -> Option<usize> {
    if value.is_finite() && value >= 0.0 && (value as usize) < PLANET_COUNT {
        Some(value as usize)
    } else {
        None
    }
}

/// Catalog as JSON for the host's menu and info panel.
pub fn catalog_json() -> Result<String, serde_json::Error> {
    serde_json::to_string(&PLANETS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (i, a) in PLANETS.iter().enumerate() {
            for b in &PLANETS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn index_constants_match_ids() {
        assert_eq!(index_of("mercury"), Some(MERCURY));
        assert_eq!(index_of("venus"), Some(VENUS));
        assert_eq!(index_of("earth"), Some(EARTH));
        assert_eq!(index_of("mars"), Some(MARS));
        assert_eq!(index_of("jupiter"), Some(JUPITER));
        assert_eq!(index_of("saturn"), Some(SATURN));
        assert_eq!(index_of("uranus"), Some(URANUS));
        assert_eq!(index_of("neptune"), Some(NEPTUNE));
        assert_eq!(index_of("pluto"), None);
    }

    #[test]
    fn colors_parse_and_geometry_is_positive() {
        for p in &PLANETS {
            assert!(Rgb::from_hex(p.color).is_some(), "{}", p.color);
            assert!(p.radius > 0.0 && p.distance > 0.0 && p.speed > 0.0);
        }
        assert!(Rgb::from_hex(SUN_COLOR).is_some());
    }

    #[test]
    fn only_saturn_has_rings() {
        let ringed: Vec<usize> = (0..PLANET_COUNT).filter(|&i| PLANETS[i].has_ring).collect();
        assert_eq!(ringed, vec![SATURN]);
    }

    #[test]
    fn display_name_parts() {
        assert_eq!(PLANETS[EARTH].short_name(), "地球");
        assert_eq!(PLANETS[EARTH].alt_name(), Some("Earth"));
    }

    #[test]
    fn event_indices_are_range_checked() {
        assert_eq!(index_from_event(2.0), Some(2));
        assert_eq!(index_from_event(-1.0), None);
        assert_eq!(index_from_event(8.0), None);
        assert_eq!(index_from_event(f32::NAN), None);
    }

    #[test]
    fn catalog_json_uses_camel_case() {
        let json = catalog_json().unwrap();
        assert!(json.contains("\"startAngle\":4.0"));
        assert!(json.contains("\"hasRing\":true"));
        assert!(json.starts_with("[{\"id\":\"mercury\""));
    }
}
