//! egui visuals derived from the active map theme.

use crate::state::ThemeKey;
use eframe::egui::{self, Color32, Stroke};

/// Builds window chrome visuals for a theme.
///
/// Dark themes start from egui's dark visuals, the rest from light.
pub fn theme_visuals(key: ThemeKey) -> egui::Visuals {
    let theme = key.definition();
    let mut visuals = if key.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    visuals.panel_fill = theme.ui_background;
    visuals.window_fill = theme.ui_menu_bg;
    visuals.window_stroke = Stroke::new(1.0, theme.ui_accent);
    visuals.extreme_bg_color = theme.ui_background;
    visuals.override_text_color = Some(theme.ui_text);
    visuals.hyperlink_color = theme.ui_accent;
    visuals.selection.bg_fill = theme.ui_accent;
    visuals.selection.stroke = Stroke::new(1.0, theme.ui_background);

    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        widget.bg_stroke = Stroke::new(1.0, theme.ui_accent);
        widget.fg_stroke.color = theme.ui_text;
    }
    visuals.widgets.inactive.weak_bg_fill = theme.ui_background;
    visuals.widgets.inactive.bg_fill = theme.ui_background;
    visuals.widgets.hovered.weak_bg_fill = blend(theme.ui_background, theme.ui_accent);
    visuals.widgets.active.weak_bg_fill = theme.ui_accent;
    visuals.widgets.open.weak_bg_fill = theme.ui_background;

    visuals
}

/// Midpoint of two colors, used for hover highlights.
fn blend(a: Color32, b: Color32) -> Color32 {
    let mix = |x: u8, y: u8| ((x as u16 + y as u16) / 2) as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}
