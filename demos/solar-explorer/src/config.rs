//! Host-tunable settings. Every field has a default, so the host may send
//! any subset as JSON through `game_configure`.

use serde::Deserialize;

use crate::facts::{FactSource, OfflineSource};
use crate::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::hover::{HOVER_SPEED_FACTOR, NORMAL_SPEED_FACTOR};
use crate::travel::RigConfig;
use crate::warp::WarpConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub rig: RigConfig,
    pub hover: HoverConfig,
    pub warp: WarpConfig,
    pub facts: FactConfig,
}

impl ExplorerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    /// Clock speed factor while a planet is hovered.
    pub slow_factor: f32,
    pub normal_factor: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            slow_factor: HOVER_SPEED_FACTOR,
            normal_factor: NORMAL_SPEED_FACTOR,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FactConfig {
    pub endpoint: String,
    pub model: String,
    /// Baked in from `GEMINI_API_KEY` at build time unless overridden.
    pub api_key: Option<String>,
}

impl Default for FactConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: option_env!("GEMINI_API_KEY").map(str::to_owned),
        }
    }
}

impl FactConfig {
    fn key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// Pick the transport: Gemini in the browser when a key is present,
    /// otherwise the offline source that always falls back.
    pub fn source(&self) -> Box<dyn FactSource> {
        #[cfg(target_arch = "wasm32")]
        if let Some(key) = self.key() {
            return Box::new(crate::gemini::GeminiSource::new(
                self.endpoint.clone(),
                self.model.clone(),
                key.to_owned(),
            ));
        }
        if self.key().is_none() {
            log::info!("no Gemini API key; planet facts use static descriptions");
        }
        Box::new(OfflineSource)
    }
}
