//! Controls menu: position toggle, navigation pad, theme picker, reset and
//! share.

use crate::config::MapConfig;
use crate::state::{url_state, AppState, Direction, ThemeDefinition, ThemeKey};
use eframe::egui::{self, Color32, Rect, RichText, Stroke, Vec2};
use egui_phosphor::regular as icons;
use web_time::Instant;

/// Confirmation color for a successful share.
const SHARE_SUCCESS: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);

/// Renders the menu toggle button and, when open, the controls menu,
/// anchored to the map's top-left corner.
pub fn render_menu(ctx: &egui::Context, state: &mut AppState, map_rect: Rect, config: &MapConfig) {
    let theme = state.theme();
    let corner = map_rect.left_top();

    egui::Area::new(egui::Id::new("menu_toggle"))
        .fixed_pos(corner + Vec2::splat(16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let icon = if state.show_menu { icons::X } else { icons::LIST };
            let button = egui::Button::new(RichText::new(icon).size(16.0).color(theme.ui_text))
                .fill(theme.ui_menu_bg)
                .stroke(Stroke::new(1.0, theme.ui_accent))
                .min_size(Vec2::splat(36.0));
            if ui.add(button).clicked() {
                state.show_menu = !state.show_menu;
            }
        });

    if !state.show_menu {
        return;
    }

    egui::Area::new(egui::Id::new("controls_menu"))
        .fixed_pos(corner + Vec2::new(16.0, 64.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(theme.ui_menu_bg)
                .stroke(Stroke::new(1.0, theme.ui_accent))
                .corner_radius(6.0)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_max_width(288.0);
                    ui.spacing_mut().item_spacing.y = 8.0;
                    render_menu_contents(ui, state, theme, config);
                });
        });
}

fn render_menu_contents(
    ui: &mut egui::Ui,
    state: &mut AppState,
    theme: &ThemeDefinition,
    config: &MapConfig,
) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Controls").strong().color(theme.ui_text));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let close =
                egui::Button::new(RichText::new(icons::X).color(theme.ui_text)).frame(false);
            if ui.add(close).clicked() {
                state.show_menu = false;
            }
        });
    });

    ui.checkbox(&mut state.view.show_rotation, "Show position");

    ui.add_space(4.0);
    ui.label(RichText::new("Navigation").size(13.0));
    render_navigation_pad(ui, state, theme, config.button_step);

    ui.add_space(4.0);
    ui.label(RichText::new("Themes").size(13.0));
    egui::ComboBox::from_id_salt("theme_selector")
        .selected_text(state.view.theme.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for key in ThemeKey::all() {
                ui.selectable_value(&mut state.view.theme, *key, key.label());
            }
        });

    ui.add_space(4.0);
    render_action_buttons(ui, state, theme, config);

    ui.add_space(4.0);
    for line in [
        "Drag to move your viewpoint on Earth.",
        "Use arrow keys for precise navigation.",
        "Share your view with others using the Share button.",
    ] {
        ui.label(RichText::new(line).size(11.0).color(theme.ui_text));
    }
}

fn render_navigation_pad(
    ui: &mut egui::Ui,
    state: &mut AppState,
    theme: &ThemeDefinition,
    step: f64,
) {
    let nav_button = |ui: &mut egui::Ui, icon: &str| {
        let button = egui::Button::new(RichText::new(icon).color(theme.ui_text))
            .fill(theme.ui_background)
            .stroke(Stroke::new(1.0, theme.ui_accent))
            .min_size(Vec2::new(40.0, 28.0));
        ui.add(button).clicked()
    };

    let mut moves = Vec::new();
    ui.vertical_centered(|ui| {
        if nav_button(ui, icons::ARROW_UP) {
            moves.push(Direction::Up);
        }
        ui.horizontal(|ui| {
            // Center the middle row under the up/down buttons.
            let row_width = 2.0 * 40.0 + ui.spacing().item_spacing.x;
            ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));
            if nav_button(ui, icons::ARROW_LEFT) {
                moves.push(Direction::Left);
            }
            if nav_button(ui, icons::ARROW_RIGHT) {
                moves.push(Direction::Right);
            }
        });
        if nav_button(ui, icons::ARROW_DOWN) {
            moves.push(Direction::Down);
        }
    });

    for direction in moves {
        state.move_camera(direction, step);
    }
}

fn render_action_buttons(
    ui: &mut egui::Ui,
    state: &mut AppState,
    theme: &ThemeDefinition,
    config: &MapConfig,
) {
    let now = Instant::now();
    let copied = state.share_feedback_active(now);

    ui.columns(2, |columns| {
        let reset = egui::Button::new(
            RichText::new(format!("{} Reset", icons::ARROWS_CLOCKWISE)).color(theme.ui_background),
        )
        .fill(theme.ui_accent);
        if columns[0].add_sized([columns[0].available_width(), 30.0], reset).clicked() {
            state.reset_position();
        }

        let (label, fill) = if copied {
            (format!("{} Copied!", icons::CHECK), SHARE_SUCCESS)
        } else {
            (format!("{} Share", icons::SHARE_NETWORK), theme.ui_accent)
        };
        let share = egui::Button::new(RichText::new(label).color(theme.ui_background)).fill(fill);
        if columns[1].add_sized([columns[1].available_width(), 30.0], share).clicked() {
            share_view(columns[1].ctx(), state, now, config);
        }
    });

    if copied {
        if let Some(until) = state.share_feedback_until {
            ui.ctx().request_repaint_after(until.saturating_duration_since(now));
        }
    }
}

/// Copies a link to the current view to the clipboard.
fn share_view(ctx: &egui::Context, state: &mut AppState, now: Instant, config: &MapConfig) {
    match url_state::share_url(state.view.position, state.view.theme) {
        Ok(url) => {
            log::info!("Copied share link: {}", url);
            ctx.copy_text(url);
            state.share_feedback_until = Some(now + config.share_feedback);
        }
        Err(e) => log::error!("Failed to build share link: {}", e),
    }
}
