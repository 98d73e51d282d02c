//! Game settings and preferences
//!
//! Persisted in LocalStorage, separate from the balance table in `tuning`.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Next preset, wrapping back to Low
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Camera far plane; lanes beyond it are clipped
    pub fn draw_distance(&self) -> f32 {
        match self {
            QualityPreset::Low => 14.0,
            QualityPreset::Medium => 20.0,
            QualityPreset::High => 30.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            show_fps: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,
        }
    }
}

impl Settings {
    /// Apply an in-game hotkey: `q` cycles quality, `f` toggles the FPS counter.
    /// Returns true if anything changed.
    pub fn apply_key(&mut self, key: &str) -> bool {
        match key {
            "q" | "Q" => {
                self.quality = self.quality.next();
                log::info!("Quality: {}", self.quality.as_str());
                true
            }
            "f" | "F" => {
                self.show_fps = !self.show_fps;
                true
            }
            _ => false,
        }
    }

    /// Far plane for the follow camera
    pub fn draw_distance(&self) -> f32 {
        self.quality.draw_distance()
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "frogger_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored settings unreadable: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_draw_distance_follows_preset() {
        assert_eq!(Settings::default().draw_distance(), 20.0);
        assert!(QualityPreset::Low.draw_distance() < QualityPreset::High.draw_distance());
    }

    #[test]
    fn test_hotkeys_cycle_quality_and_fps() {
        let mut settings = Settings::default();
        assert!(settings.apply_key("q"));
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.apply_key("Q"));
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.draw_distance(), 14.0);

        assert!(settings.apply_key("f"));
        assert!(settings.show_fps);
        assert!(settings.apply_key("f"));
        assert!(!settings.show_fps);

        assert!(!settings.apply_key("ArrowUp"));
        assert_eq!(settings.quality, QualityPreset::Low);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "show_fps": true }"#).unwrap();
        assert!(settings.show_fps);
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.mute_on_blur);
    }
}
