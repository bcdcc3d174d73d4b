// extensions/mod.rs
//
// Optional helpers decoupled from core Entity/Scene.

pub mod easing;

pub use easing::{lerp_vec3, move_towards};
