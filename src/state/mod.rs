//! Application state management.
//!
//! The persisted view (position, theme, readout toggle) lives alongside
//! transient UI state such as the open menu and an in-progress drag.

mod debounce;
mod manager;
pub mod settings;
mod theme;
pub mod url_state;
mod view;

pub use manager::ViewStateManager;
pub use settings::PersistedViewState;
pub use theme::{ThemeDefinition, ThemeKey};
pub use view::{CameraPosition, Direction, DragTracker};

use web_time::Instant;

/// Root application state.
#[derive(Default)]
pub struct AppState {
    /// The view mirrored into storage and the URL
    pub view: PersistedViewState,

    /// Whether the controls menu is open
    pub show_menu: bool,

    /// Active pointer drag over the map
    pub drag: DragTracker,

    /// Until when the share button shows its confirmation
    pub share_feedback_until: Option<Instant>,
}

impl AppState {
    pub fn new(view: PersistedViewState) -> Self {
        Self {
            view,
            ..Default::default()
        }
    }

    pub fn theme(&self) -> &'static ThemeDefinition {
        self.view.theme.definition()
    }

    /// Steps the camera in a direction.
    pub fn move_camera(&mut self, direction: Direction, step: f64) {
        self.view.position = self.view.position.stepped(direction, step);
    }

    /// Returns to (0°, 0°). The theme is kept.
    pub fn reset_position(&mut self) {
        self.view.position = CameraPosition::ORIGIN;
    }

    pub fn share_feedback_active(&self, now: Instant) -> bool {
        self.share_feedback_until.is_some_and(|until| now < until)
    }
}
