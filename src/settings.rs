//! Game settings and preferences
//!
//! Persisted separately from the best score: a JSON file on native builds,
//! LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CATCH_UP_TICKS, MAX_FRAME_MS, MAX_PARTICLES};

/// How shots are triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FireMode {
    /// Fire whenever the cooldown allows, regardless of input
    #[default]
    Auto,
    /// Fire only on a fire request; requests during cooldown are dropped
    Manual,
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fire_mode: FireMode,

    // === Scheduling ===
    /// Most simulation ticks run for one delivered frame
    pub max_catch_up_ticks: u32,
    /// Longest frame delta accepted before clamping (ms)
    pub max_frame_ms: f64,

    // === Visual Effects ===
    /// Particle effects (muzzle flashes, hit sparks)
    pub particles: bool,
    pub max_particles: usize,

    /// Fixed RNG seed; random per session when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fire_mode: FireMode::Auto,
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
            max_frame_ms: MAX_FRAME_MS,
            particles: true,
            max_particles: MAX_PARTICLES,
            seed: None,
        }
    }
}

impl Settings {
    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.max_particles
        }
    }

    /// Repair out-of-range values in place, logging each fix
    pub fn sanitize(&mut self) {
        if self.max_catch_up_ticks == 0 {
            log::warn!("max_catch_up_ticks must be at least 1, using default");
            self.max_catch_up_ticks = MAX_CATCH_UP_TICKS;
        }
        if !(self.max_frame_ms > 0.0) {
            log::warn!("max_frame_ms must be positive, using default");
            self.max_frame_ms = MAX_FRAME_MS;
        }
    }

    /// Parse settings from JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.sanitize();
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Default settings file name for native builds
    pub const FILE_NAME: &'static str = "drift_shooter_settings.json";

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "drift_shooter_settings";

    /// Load settings from a file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Log the outcome of a save; true when the write went through
    fn log_save<E: std::fmt::Debug>(result: Result<(), E>) -> bool {
        match result {
            Ok(()) => {
                log::info!("Settings saved");
                true
            }
            Err(e) => {
                log::warn!("Could not save settings: {:?}", e);
                false
            }
        }
    }

    /// Save settings to a file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: &std::path::Path) -> bool {
        Self::log_save(std::fs::write(path, self.to_json()))
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> bool {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        match storage {
            Some(storage) => Self::log_save(storage.set_item(Self::STORAGE_KEY, &self.to_json())),
            None => Self::log_save(Err("LocalStorage unavailable")),
        }
    }
}
