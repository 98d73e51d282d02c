//! Data-driven game balance
//!
//! Everything a designer might want to tweak without touching the simulation:
//! lives, speeds, spawn counts and the per-tick chances behind turtles and flies.
//! Loaded from JSON (LocalStorage on web) and validated before use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on entities of one kind (brute-force overlap scans stay tiny)
pub const MAX_PER_CATEGORY: usize = 9;

/// Reasons a tuning table is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("initial_lives must be at least 1")]
    NoLives,
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("platform speed range is inverted ({min} > {max})")]
    InvertedSpeedRange { min: f32, max: f32 },
    #[error("{name} must be a probability in [0, 1] (got {value})")]
    BadChance { name: &'static str, value: f32 },
    #[error("{name} must be between {min} and {max} (got {value})")]
    BadCount {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

/// Game balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at the start of a run
    pub initial_lives: u8,
    /// Car displacement per tick (cars all share one speed)
    pub car_speed: f32,
    /// Platform displacement per tick is drawn from [min, max)
    pub platform_speed_min: f32,
    pub platform_speed_max: f32,
    /// Per-tick chance that a turtle dives or surfaces
    pub turtle_toggle_chance: f32,
    /// Per-tick chance that a fly appears, or moves on if already visible
    pub fly_toggle_chance: f32,
    /// Points for reaching the far row
    pub goal_points: f32,
    /// Points for snapping up a fly
    pub fly_points: f32,
    pub car_count: usize,
    pub log_count: usize,
    pub turtle_count: usize,
    /// Flies on the middle sidewalk
    pub fly_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_lives: 5,
            car_speed: 0.1,
            platform_speed_min: 0.01,
            platform_speed_max: 0.02,
            turtle_toggle_chance: 0.01,
            fly_toggle_chance: 0.01,
            goal_points: 1.0,
            fly_points: 0.5,
            car_count: 5,
            log_count: 9,
            turtle_count: 9,
            fly_count: 3,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning table. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.initial_lives == 0 {
            return Err(TuningError::NoLives);
        }

        for (name, value) in [
            ("car_speed", self.car_speed),
            ("platform_speed_min", self.platform_speed_min),
            ("platform_speed_max", self.platform_speed_max),
            ("goal_points", self.goal_points),
            ("fly_points", self.fly_points),
        ] {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { name, value });
            }
        }

        if self.platform_speed_min > self.platform_speed_max {
            return Err(TuningError::InvertedSpeedRange {
                min: self.platform_speed_min,
                max: self.platform_speed_max,
            });
        }

        for (name, value) in [
            ("turtle_toggle_chance", self.turtle_toggle_chance),
            ("fly_toggle_chance", self.fly_toggle_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::BadChance { name, value });
            }
        }

        for (name, value, min) in [
            ("car_count", self.car_count, 1),
            ("log_count", self.log_count, 1),
            ("turtle_count", self.turtle_count, 0),
            ("fly_count", self.fly_count, 0),
        ] {
            if value < min || value > MAX_PER_CATEGORY {
                return Err(TuningError::BadCount {
                    name,
                    value,
                    min,
                    max: MAX_PER_CATEGORY,
                });
            }
        }

        Ok(())
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "frogger_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
