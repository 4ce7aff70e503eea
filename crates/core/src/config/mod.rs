use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub array: ArrayConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

impl AppConfig {
    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Configuration for the live array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayConfig {
    pub length: usize,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self { length: 20 }
    }
}

/// Configuration for the replay scheduler and its tone mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Fixed interval between replay steps, in milliseconds.
    pub tick_ms: u64,
    /// Frequency emitted for a value of 0.0.
    pub tone_base_hz: f32,
    /// Frequency range spanned as values go from 0.0 to 1.0.
    pub tone_span_hz: f32,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            tone_base_hz: 200.0,
            tone_span_hz: 500.0,
        }
    }
}
