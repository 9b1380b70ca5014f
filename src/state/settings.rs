//! Persisted view settings.
//!
//! The view (position, theme, position-readout toggle) is mirrored into
//! localStorage so it survives page reloads.

use super::theme::ThemeKey;
use super::url_state::UrlParams;
use super::view::CameraPosition;
use crate::config::StorageConfig;
use crate::storage::{KeyValueStore, StorageError};

/// The view state mirrored into storage and the URL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistedViewState {
    pub position: CameraPosition,
    pub theme: ThemeKey,
    pub show_rotation: bool,
}

impl Default for PersistedViewState {
    fn default() -> Self {
        Self {
            position: CameraPosition::ORIGIN,
            theme: ThemeKey::default(),
            show_rotation: true,
        }
    }
}

/// Whatever could be recovered from storage, field by field.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StoredView {
    pub position: Option<CameraPosition>,
    pub theme: Option<ThemeKey>,
    pub show_rotation: Option<bool>,
}

impl StoredView {
    /// Load stored values. Each key is read independently; a missing or
    /// corrupt key is logged and left as `None`.
    pub fn load(store: &dyn KeyValueStore, config: &StorageConfig) -> Self {
        let position = read_key(store, &config.position_key).and_then(|json| {
            match serde_json::from_str::<CameraPosition>(&json) {
                Ok(position) => Some(position),
                Err(e) => {
                    log::error!("Failed to parse saved position {:?}: {}", json, e);
                    None
                }
            }
        });

        let theme = read_key(store, &config.theme_key).and_then(|key| {
            let theme = ThemeKey::from_key(&key);
            if theme.is_none() {
                log::warn!("Ignoring unknown saved theme {:?}", key);
            }
            theme
        });

        let show_rotation =
            read_key(store, &config.show_rotation_key).map(|value| value == "true");

        Self {
            position,
            theme,
            show_rotation,
        }
    }
}

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get_item(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read {}: {}", key, e);
            None
        }
    }
}

impl PersistedViewState {
    /// Resolves the initial view: URL parameters first, then storage, then
    /// defaults.
    ///
    /// The position only comes from the URL when both `lon` and `lat` are
    /// present. The readout toggle is never part of the URL.
    pub fn resolve(url: &UrlParams, stored: &StoredView) -> Self {
        let defaults = Self::default();
        Self {
            position: url
                .position()
                .or(stored.position)
                .unwrap_or(defaults.position),
            theme: url.theme.or(stored.theme).unwrap_or(defaults.theme),
            show_rotation: stored.show_rotation.unwrap_or(defaults.show_rotation),
        }
    }

    /// Save all three keys.
    pub fn save(
        &self,
        store: &dyn KeyValueStore,
        config: &StorageConfig,
    ) -> Result<(), StorageError> {
        let position = serde_json::to_string(&self.position)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        store.set_item(&config.position_key, &position)?;
        store.set_item(&config.theme_key, self.theme.key())?;
        store.set_item(
            &config.show_rotation_key,
            if self.show_rotation { "true" } else { "false" },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::url_state::parse_query;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_when_nothing_stored() {
        let store = MemoryStore::new();
        let stored = StoredView::load(&store, &StorageConfig::default());
        assert_eq!(stored, StoredView::default());

        let view = PersistedViewState::resolve(&UrlParams::default(), &stored);
        assert_eq!(view, PersistedViewState::default());
        assert_eq!(view.position, CameraPosition::ORIGIN);
        assert_eq!(view.theme, ThemeKey::Classic);
        assert!(view.show_rotation);
    }

    #[test]
    fn test_save_writes_expected_formats() {
        let store = MemoryStore::new();
        let config = StorageConfig::default();
        let view = PersistedViewState {
            position: CameraPosition::new(-45.5, 12.0),
            theme: ThemeKey::NeonGreen,
            show_rotation: false,
        };
        view.save(&store, &config).unwrap();

        assert_eq!(
            store.get_item("mercatorPosition").unwrap().as_deref(),
            Some("[-45.5,12.0]")
        );
        assert_eq!(
            store.get_item("mercatorTheme").unwrap().as_deref(),
            Some("neonGreen")
        );
        assert_eq!(
            store.get_item("mercatorShowRotation").unwrap().as_deref(),
            Some("false")
        );

        let stored = StoredView::load(&store, &config);
        assert_eq!(
            PersistedViewState::resolve(&UrlParams::default(), &stored),
            view
        );
    }

    #[test]
    fn test_corrupt_storage_falls_back() {
        let store = MemoryStore::new();
        store.set_item("mercatorPosition", "not json").unwrap();
        store.set_item("mercatorTheme", "vaporwave").unwrap();
        store.set_item("mercatorShowRotation", "nope").unwrap();

        let stored = StoredView::load(&store, &StorageConfig::default());
        assert_eq!(stored.position, None);
        assert_eq!(stored.theme, None);
        assert_eq!(stored.show_rotation, Some(false));

        let view = PersistedViewState::resolve(&UrlParams::default(), &stored);
        assert_eq!(view.position, CameraPosition::ORIGIN);
        assert_eq!(view.theme, ThemeKey::Classic);
    }

    #[test]
    fn test_url_takes_precedence() {
        let stored = StoredView {
            position: Some(CameraPosition::new(1.0, 2.0)),
            theme: Some(ThemeKey::Dark),
            show_rotation: Some(false),
        };

        let url = parse_query("?lon=100&lat=-20&theme=earth");
        let view = PersistedViewState::resolve(&url, &stored);
        assert_eq!(view.position, CameraPosition::new(100.0, -20.0));
        assert_eq!(view.theme, ThemeKey::Earth);
        assert!(!view.show_rotation);
    }

    #[test]
    fn test_partial_url_falls_back_per_field() {
        let stored = StoredView {
            position: Some(CameraPosition::new(1.0, 2.0)),
            theme: Some(ThemeKey::Dark),
            show_rotation: None,
        };

        // Only lon present: position comes from storage; bad theme too.
        let url = parse_query("?lon=100&theme=bogus");
        let view = PersistedViewState::resolve(&url, &stored);
        assert_eq!(view.position, CameraPosition::new(1.0, 2.0));
        assert_eq!(view.theme, ThemeKey::Dark);
        assert!(view.show_rotation);
    }
}
