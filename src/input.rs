//! Pointer and keyboard navigation.
//!
//! Converts drags over the map and arrow key presses into camera moves.

use crate::state::{AppState, Direction};
use eframe::egui::{self, Key, Pos2, Response};

/// A pointer event relevant to dragging the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Pos2),
    Moved(Pos2),
    Released,
}

const ARROW_KEYS: [(Key, Direction); 4] = [
    (Key::ArrowUp, Direction::Up),
    (Key::ArrowDown, Direction::Down),
    (Key::ArrowLeft, Direction::Left),
    (Key::ArrowRight, Direction::Right),
];

/// Reads this frame's drag events off the map response.
///
/// A drag that starts over the map keeps tracking the pointer until the
/// button is released, even outside the map area.
pub fn pointer_events(response: &Response) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let pos = response.interact_pointer_pos();

    if response.drag_started() {
        if let Some(pos) = pos {
            events.push(PointerEvent::Pressed(pos));
        }
    } else if response.dragged() {
        if let Some(pos) = pos {
            events.push(PointerEvent::Moved(pos));
        }
    }
    if response.drag_stopped() {
        events.push(PointerEvent::Released);
    }

    events
}

/// Applies a pointer event to the view. Returns true if the camera moved.
pub fn apply_pointer(state: &mut AppState, event: PointerEvent, drag_scale: f64) -> bool {
    match event {
        PointerEvent::Pressed(pos) => {
            state.drag.begin(pos.x as f64, pos.y as f64);
            false
        }
        PointerEvent::Moved(pos) => match state.drag.update(pos.x as f64, pos.y as f64) {
            Some((dx, dy)) if dx != 0.0 || dy != 0.0 => {
                state.view.position = state.view.position.dragged(dx, dy, drag_scale);
                true
            }
            _ => false,
        },
        PointerEvent::Released => {
            state.drag.end();
            false
        }
    }
}

fn arrow_direction(key: Key) -> Option<Direction> {
    ARROW_KEYS
        .iter()
        .find(|(arrow, _)| *arrow == key)
        .map(|&(_, direction)| direction)
}

/// Consumes arrow key presses (including auto-repeat) so nothing else
/// scrolls on them, returning one direction per press in input order.
///
/// Modifier keys held at the same time are ignored.
pub fn take_arrow_keys(ctx: &egui::Context) -> Vec<Direction> {
    ctx.input_mut(|input| {
        let mut directions = Vec::new();
        input.events.retain(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                ..
            } => match arrow_direction(*key) {
                Some(direction) => {
                    directions.push(direction);
                    false
                }
                None => true,
            },
            _ => true,
        });
        directions
    })
}

/// Steps the camera once per direction.
pub fn apply_directions(state: &mut AppState, directions: &[Direction], step: f64) {
    for &direction in directions {
        state.move_camera(direction, step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CameraPosition;
    use eframe::egui::Modifiers;

    fn key_press(key: Key) -> egui::Event {
        key_press_with(key, Modifiers::NONE)
    }

    fn key_press_with(key: Key, modifiers: Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    fn read_keys(events: Vec<egui::Event>) -> Vec<Direction> {
        let ctx = egui::Context::default();
        let raw = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut directions = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            directions = take_arrow_keys(ctx);
        });
        directions
    }

    #[test]
    fn test_drag_delta() {
        let mut state = AppState::default();
        state.view.position = CameraPosition::new(10.0, 20.0);

        assert!(!apply_pointer(&mut state, PointerEvent::Pressed(Pos2::new(100.0, 100.0)), 0.25));
        assert!(state.drag.is_dragging());

        assert!(apply_pointer(&mut state, PointerEvent::Moved(Pos2::new(140.0, 80.0)), 0.25));
        // (dx, dy) = (40, -20) -> (-10°, -5°)
        assert_eq!(state.view.position, CameraPosition::new(0.0, 15.0));

        assert!(apply_pointer(&mut state, PointerEvent::Moved(Pos2::new(136.0, 88.0)), 0.25));
        assert_eq!(state.view.position, CameraPosition::new(1.0, 17.0));

        apply_pointer(&mut state, PointerEvent::Released, 0.25);
        assert!(!state.drag.is_dragging());
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut state = AppState::default();
        assert!(!apply_pointer(&mut state, PointerEvent::Moved(Pos2::new(50.0, 50.0)), 0.25));
        assert_eq!(state.view.position, CameraPosition::ORIGIN);
    }

    #[test]
    fn test_drag_does_not_clamp_latitude() {
        let mut state = AppState::default();
        apply_pointer(&mut state, PointerEvent::Pressed(Pos2::new(0.0, 0.0)), 0.25);
        apply_pointer(&mut state, PointerEvent::Moved(Pos2::new(0.0, 400.0)), 0.25);
        assert_eq!(state.view.position.lat, 100.0);
    }

    #[test]
    fn test_arrow_right_steps_five_degrees() {
        let mut state = AppState::default();
        state.view.position = CameraPosition::new(-3.0, 7.0);

        let directions = read_keys(vec![key_press(Key::ArrowRight)]);
        assert_eq!(directions, vec![Direction::Right]);

        apply_directions(&mut state, &directions, 5.0);
        assert_eq!(state.view.position, CameraPosition::new(2.0, 7.0));
    }

    #[test]
    fn test_repeated_and_other_keys() {
        let directions = read_keys(vec![
            key_press(Key::ArrowUp),
            key_press(Key::A),
            key_press(Key::ArrowUp),
            key_press(Key::ArrowLeft),
        ]);
        assert_eq!(directions.iter().filter(|d| **d == Direction::Up).count(), 2);
        assert_eq!(directions.iter().filter(|d| **d == Direction::Left).count(), 1);
        assert_eq!(directions.len(), 3);
    }

    #[test]
    fn test_arrow_keys_ignore_modifiers() {
        let directions = read_keys(vec![
            key_press_with(Key::ArrowRight, Modifiers::SHIFT),
            key_press_with(Key::ArrowUp, Modifiers::CTRL),
        ]);
        assert_eq!(directions, vec![Direction::Right, Direction::Up]);

        let mut state = AppState::default();
        apply_directions(&mut state, &directions[..1], 5.0);
        assert_eq!(state.view.position, CameraPosition::new(5.0, 0.0));
    }

    #[test]
    fn test_key_release_is_not_a_press() {
        let release = egui::Event::Key {
            key: Key::ArrowDown,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: Modifiers::NONE,
        };
        assert!(read_keys(vec![release]).is_empty());
    }
}
