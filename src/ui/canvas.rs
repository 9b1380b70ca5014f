//! Central canvas UI: the map area and its overlays.

use crate::config::MapConfig;
use crate::geo::{render_globe, render_map, GeoLayerSet};
use crate::input;
use crate::state::{AppState, ThemeDefinition};
use eframe::egui::{self, Align2, CursorIcon, Pos2, Rect, RichText, Sense, Stroke, Vec2};

/// Gap between overlays and the map edge.
const OVERLAY_INSET: f32 = 16.0;

/// Space between the globe and its round frame.
const GLOBE_PADDING: f32 = 4.0;

/// Renders the map with the globe indicator and position readout.
///
/// Returns the map area so other overlays can anchor to it.
pub fn render_canvas(
    ctx: &egui::Context,
    state: &mut AppState,
    geo_layers: Option<&GeoLayerSet>,
    config: &MapConfig,
) -> Rect {
    let theme = state.theme();

    let mut map_rect = Rect::NOTHING;
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(theme.ui_background))
        .show(ctx, |ui| {
            map_rect = map_area(ui.max_rect(), config.container_margin);

            let response = ui.allocate_rect(map_rect, Sense::drag());
            handle_canvas_interaction(ctx, &response, state, config);

            render_map(
                &ui.painter_at(map_rect),
                map_rect,
                geo_layers,
                state.view.position,
                state.theme(),
            );
        });

    render_globe_overlay(ctx, state, map_rect, config.globe_size);
    if state.view.show_rotation {
        render_position_overlay(ctx, state, map_rect);
    }

    map_rect
}

/// The map fills the window less `margin` in each dimension, centered.
pub fn map_area(available: Rect, margin: f32) -> Rect {
    let size = (available.size() - Vec2::splat(margin)).max(Vec2::ZERO);
    Rect::from_center_size(available.center(), size)
}

fn handle_canvas_interaction(
    ctx: &egui::Context,
    response: &egui::Response,
    state: &mut AppState,
    config: &MapConfig,
) {
    for event in input::pointer_events(response) {
        input::apply_pointer(state, event, config.drag_scale);
    }

    if state.drag.is_dragging() {
        ctx.set_cursor_icon(CursorIcon::Grabbing);
    } else if response.hovered() {
        ctx.set_cursor_icon(CursorIcon::Grab);
    }
}

fn render_globe_overlay(ctx: &egui::Context, state: &AppState, map_rect: Rect, size: f32) {
    let anchor = map_rect.right_top() + Vec2::new(-OVERLAY_INSET, OVERLAY_INSET);

    egui::Area::new(egui::Id::new("globe_indicator"))
        .pivot(Align2::RIGHT_TOP)
        .fixed_pos(anchor)
        .interactable(false)
        .show(ctx, |ui| {
            globe_frame(state.theme(), size).show(ui, |ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
                render_globe(ui.painter(), rect, state.view.position, state.theme());
            });
        });
}

/// Round themed backdrop behind the globe.
fn globe_frame(theme: &ThemeDefinition, size: f32) -> egui::Frame {
    egui::Frame::new()
        .fill(theme.ui_menu_bg)
        .stroke(Stroke::new(1.0, theme.ui_accent))
        .corner_radius(size / 2.0 + GLOBE_PADDING)
        .inner_margin(GLOBE_PADDING)
}

fn render_position_overlay(ctx: &egui::Context, state: &AppState, map_rect: Rect) {
    let theme = state.theme();
    let anchor: Pos2 = map_rect.left_bottom() + Vec2::new(OVERLAY_INSET, -OVERLAY_INSET);

    egui::Area::new(egui::Id::new("position_overlay"))
        .pivot(Align2::LEFT_BOTTOM)
        .fixed_pos(anchor)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(theme.ui_menu_bg)
                .stroke(Stroke::new(1.0, theme.ui_accent))
                .corner_radius(6.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(state.view.position.display_label())
                            .size(14.0)
                            .color(theme.ui_text),
                    );
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ThemeKey;

    #[test]
    fn test_map_area_margin() {
        let window = Rect::from_min_size(Pos2::ZERO, Vec2::new(1280.0, 720.0));
        let area = map_area(window, 40.0);
        assert_eq!(area.size(), Vec2::new(1240.0, 680.0));
        assert_eq!(area.center(), window.center());
    }

    #[test]
    fn test_globe_frame_is_round_and_themed() {
        for key in ThemeKey::all() {
            let theme = key.definition();
            let frame = globe_frame(theme, 80.0);
            assert_eq!(frame.fill, theme.ui_menu_bg);
            assert_eq!(frame.stroke, Stroke::new(1.0, theme.ui_accent));
            assert!(frame.corner_radius.nw as f32 >= 40.0);
            assert!(frame.corner_radius.se as f32 >= 40.0);
            assert_eq!(frame.inner_margin.left as f32, GLOBE_PADDING);
        }
    }

    #[test]
    fn test_map_area_tiny_window() {
        let window = Rect::from_min_size(Pos2::ZERO, Vec2::new(30.0, 100.0));
        let area = map_area(window, 40.0);
        assert_eq!(area.width(), 0.0);
        assert_eq!(area.height(), 60.0);
    }
}
