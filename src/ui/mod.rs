//! UI modules for the map viewer.
//!
//! The window is a single map area with floating overlays:
//! - Canvas: the map itself, the globe indicator and the position readout
//! - Menu: toggle button and the controls menu
//! - Visuals: window chrome derived from the active theme

mod canvas;
mod menu;
mod visuals;

pub use canvas::render_canvas;
pub use menu::render_menu;
pub use visuals::theme_visuals;
