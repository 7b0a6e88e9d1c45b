//! Presentation settings
//!
//! Read from the page URL (`?quality=low&fps=0`); never written anywhere.

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

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// MSAA sample count for the scene pass
    pub fn msaa_samples(&self) -> u32 {
        match self {
            QualityPreset::Low => 1,
            QualityPreset::Medium | QualityPreset::High => 4,
        }
    }

    /// Upper bound on device pixel ratio used for the backbuffer
    pub fn max_pixel_ratio(&self) -> f64 {
        match self {
            QualityPreset::Low => 1.0,
            QualityPreset::Medium => 1.5,
            QualityPreset::High => 3.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Parse a URL query string (with or without the leading `?`).
    /// Unknown keys and unparseable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "quality" => match QualityPreset::parse(value) {
                    Some(preset) => settings.quality = preset,
                    None => log::warn!("Ignoring unknown quality preset {:?}", value),
                },
                "fps" => settings.show_fps = matches!(value, "" | "1" | "true" | "on"),
                _ => {}
            }
        }

        settings
    }

    /// Backbuffer size for a CSS-pixel viewport at the given device pixel ratio
    pub fn backbuffer_size(&self, css_width: u32, css_height: u32, dpr: f64) -> (u32, u32) {
        let ratio = dpr.clamp(0.5, self.quality.max_pixel_ratio());
        (
            ((css_width as f64 * ratio) as u32).max(1),
            ((css_height as f64 * ratio) as u32).max(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        let s = Settings::from_query("?quality=low&fps=1");
        assert_eq!(s.quality, QualityPreset::Low);
        assert!(s.show_fps);

        let s = Settings::from_query("fps&quality=HIGH&unused=3");
        assert_eq!(s.quality, QualityPreset::High);
        assert!(s.show_fps);

        assert_eq!(Settings::from_query(""), Settings::default());
        assert_eq!(Settings::from_query("?quality=ultra").quality, QualityPreset::Medium);
    }

    #[test]
    fn test_backbuffer_size_caps_pixel_ratio() {
        let low = Settings::from_query("quality=low");
        assert_eq!(low.backbuffer_size(800, 600, 2.0), (800, 600));

        let high = Settings::from_query("quality=high");
        assert_eq!(high.backbuffer_size(800, 600, 2.0), (1600, 1200));
        assert_eq!(high.backbuffer_size(0, 0, 2.0), (1, 1));
    }
}
