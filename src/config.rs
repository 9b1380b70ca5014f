//! Application configuration.
//!
//! Tunables for data loading, navigation, and view-state persistence.

use web_time::Duration;

/// Public world topology dataset (Natural Earth 1:110m, TopoJSON).
pub const WORLD_ATLAS_URL: &str = "https://cdn.jsdelivr.net/npm/world-atlas@2/countries-110m.json";

/// Navigation and data-loading configuration.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// URL of the world topology document fetched at startup.
    pub topology_url: String,
    /// Delay between the last view change and the URL rewrite.
    pub url_debounce: Duration,
    /// Degrees of rotation per dragged pixel.
    pub drag_scale: f64,
    /// Degrees moved per arrow key press.
    pub key_step: f64,
    /// Degrees moved per navigation button click.
    pub button_step: f64,
    /// Diameter of the globe indicator in points.
    pub globe_size: f32,
    /// How long the share button shows its confirmation.
    pub share_feedback: Duration,
    /// Space left around the map inside the window, per dimension.
    pub container_margin: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            topology_url: WORLD_ATLAS_URL.to_string(),
            url_debounce: Duration::from_millis(500),
            drag_scale: 0.25,
            key_step: 5.0,
            button_step: 10.0,
            globe_size: 80.0,
            share_feedback: Duration::from_secs(2),
            container_margin: 40.0,
        }
    }
}

impl MapConfig {
    /// Overrides the topology source.
    #[allow(dead_code)] // Used by tests and alternate deployments
    pub fn with_topology_url(mut self, url: impl Into<String>) -> Self {
        self.topology_url = url.into();
        self
    }

    /// Overrides the URL debounce delay.
    #[allow(dead_code)] // Used by tests and alternate deployments
    pub fn with_url_debounce(mut self, debounce: Duration) -> Self {
        self.url_debounce = debounce;
        self
    }
}

/// Names of the persisted view-state keys.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// JSON `[lon, lat]` array.
    pub position_key: String,
    /// Theme key string.
    pub theme_key: String,
    /// `"true"` / `"false"`.
    pub show_rotation_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            position_key: "mercatorPosition".to_string(),
            theme_key: "mercatorTheme".to_string(),
            show_rotation_key: "mercatorShowRotation".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_navigation_constants() {
        let config = MapConfig::default();
        assert_eq!(config.url_debounce, Duration::from_millis(500));
        assert!((config.drag_scale - 0.25).abs() < f64::EPSILON);
        assert!((config.key_step - 5.0).abs() < f64::EPSILON);
        assert!((config.button_step - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder_overrides() {
        let config = MapConfig::default()
            .with_topology_url("http://localhost/world.json")
            .with_url_debounce(Duration::from_millis(50));
        assert_eq!(config.topology_url, "http://localhost/world.json");
        assert_eq!(config.url_debounce, Duration::from_millis(50));
    }
}
