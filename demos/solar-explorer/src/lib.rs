use wasm_bindgen::prelude::*;
use helio_engine::*;

pub mod bodies;
pub mod config;
pub mod facts;
pub mod game;
pub mod gemini;
pub mod hover;
pub mod orbit;
pub mod selection;
pub mod travel;
pub mod warp;
use game::SolarExplorer;

helio_web::export_game!(SolarExplorer, "solar-explorer");

// ---- Explorer-specific exports ----

/// Apply a partial JSON settings override. Call after `game_init`.
#[wasm_bindgen]
pub fn game_configure(json: &str) {
    with_runner(|r| r.game_mut().configure(json));
}

/// The planet catalog as a JSON array, in menu order.
#[wasm_bindgen]
pub fn get_catalog_json() -> String {
    bodies::catalog_json().unwrap_or_else(|e| {
        log::error!("catalog serialization failed: {e}");
        String::from("[]")
    })
}

/// Fact text for the info panel, once ready.
#[wasm_bindgen]
pub fn get_fact_text() -> Option<String> {
    with_runner(|r| r.game().facts().text().map(str::to_owned))
}

/// Localized notice shown alongside a fallback description.
#[wasm_bindgen]
pub fn get_fact_notice() -> Option<String> {
    with_runner(|r| r.game().facts().notice().map(str::to_owned))
}
