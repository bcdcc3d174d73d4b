pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{Rgb, RingMesh, SphereMesh};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, SimClock};
pub use renderer::camera::Camera3D;
pub use renderer::instance::{BodyInstance, PointInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{ProtocolLayout, HEADER_FLOATS};
pub use systems::rng::Rng;
pub use systems::render::build_render_buffer;

// Extensions: decoupled optional helpers
pub use extensions::{lerp_vec3, move_towards};
