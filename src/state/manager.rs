//! Keeps the in-memory view, localStorage, and the URL consistent.
//!
//! Storage is written on the frame a change is observed. The URL is rewritten
//! through a debouncer so a continuous drag produces a single `replaceState`
//! once the pointer settles.

use super::debounce::Debouncer;
use super::settings::{PersistedViewState, StoredView};
use super::theme::ThemeKey;
use super::url_state::UrlParams;
use super::view::CameraPosition;
use crate::config::StorageConfig;
use crate::storage::KeyValueStore;
use web_time::{Duration, Instant};

/// A URL rewrite that is due now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UrlUpdate {
    pub position: CameraPosition,
    pub theme: ThemeKey,
}

/// Synchronizes view state with storage and the URL.
pub struct ViewStateManager {
    store: Box<dyn KeyValueStore>,
    config: StorageConfig,
    url_debouncer: Debouncer,
    /// Last state written to storage.
    saved: PersistedViewState,
    /// Position/theme the pending (or last) URL write reflects.
    url_target: UrlUpdate,
}

impl ViewStateManager {
    /// Resolves the initial view from the URL, storage, and defaults.
    ///
    /// The resolved view is saved straight away and an initial URL write is
    /// scheduled, so both reflect the view after load.
    pub fn new(
        store: Box<dyn KeyValueStore>,
        config: StorageConfig,
        url_debounce: Duration,
        url: &UrlParams,
        now: Instant,
    ) -> (Self, PersistedViewState) {
        let stored = StoredView::load(store.as_ref(), &config);
        let initial = PersistedViewState::resolve(url, &stored);

        log::info!(
            "Initial view: lon={}, lat={}, theme={}",
            initial.position.lon,
            initial.position.lat,
            initial.theme.key()
        );

        if let Err(e) = initial.save(store.as_ref(), &config) {
            log::warn!("Failed to save view state: {}", e);
        }

        let mut url_debouncer = Debouncer::new(url_debounce);
        url_debouncer.schedule(now);

        let manager = Self {
            store,
            config,
            url_debouncer,
            saved: initial,
            url_target: UrlUpdate {
                position: initial.position,
                theme: initial.theme,
            },
        };
        (manager, initial)
    }

    /// Observes the current view. Call once per frame.
    ///
    /// Returns the URL update to apply when the debounce window has elapsed.
    pub fn sync(&mut self, view: &PersistedViewState, now: Instant) -> Option<UrlUpdate> {
        if *view != self.saved {
            if let Err(e) = view.save(self.store.as_ref(), &self.config) {
                log::warn!("Failed to save view state: {}", e);
            }
            self.saved = *view;
        }

        let target = UrlUpdate {
            position: view.position,
            theme: view.theme,
        };
        if target != self.url_target {
            self.url_target = target;
            self.url_debouncer.schedule(now);
        }

        self.url_debouncer.poll(now).then_some(self.url_target)
    }

    /// Time until the pending URL write, if any.
    pub fn pending_url_write(&self, now: Instant) -> Option<Duration> {
        self.url_debouncer.remaining(now)
    }

    /// Drops any pending URL write.
    pub fn cancel_pending(&mut self) {
        if self.url_debouncer.is_pending() {
            log::debug!("Dropping pending URL write");
        }
        self.url_debouncer.cancel();
    }
}
