//! Camera position and the navigation arithmetic applied to it.

use serde::{Deserialize, Serialize};

/// Camera position in degrees.
///
/// Longitude is unbounded and accumulates across wraps; latitude is not
/// clamped either. Serialized as a `[lon, lat]` JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct CameraPosition {
    pub lon: f64,
    pub lat: f64,
}

impl From<[f64; 2]> for CameraPosition {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<CameraPosition> for [f64; 2] {
    fn from(position: CameraPosition) -> Self {
        [position.lon, position.lat]
    }
}

/// Compass direction for stepped navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl CameraPosition {
    pub const ORIGIN: CameraPosition = CameraPosition { lon: 0.0, lat: 0.0 };

    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Longitude folded into [-180, 180) for display.
    pub fn normalized_lon(&self) -> f64 {
        normalize_longitude(self.lon)
    }

    /// Moves `step` degrees in `direction`. East/west moves along the current
    /// parallel.
    pub fn stepped(&self, direction: Direction, step: f64) -> Self {
        match direction {
            Direction::Up => Self::new(self.lon, self.lat + step),
            Direction::Down => Self::new(self.lon, self.lat - step),
            Direction::Right => Self::new(self.lon + step, self.lat),
            Direction::Left => Self::new(self.lon - step, self.lat),
        }
    }

    /// Applies a pointer drag of `(dx, dy)` pixels at `scale` degrees per
    /// pixel. Dragging right moves west; dragging down moves north.
    pub fn dragged(&self, dx: f64, dy: f64, scale: f64) -> Self {
        Self::new(self.lon - dx * scale, self.lat + dy * scale)
    }

    /// Overlay text for the position readout.
    pub fn display_label(&self) -> String {
        format!(
            "Your position: {:.2}°, {:.2}°",
            self.normalized_lon(),
            self.lat
        )
    }
}

/// Folds any longitude into [-180, 180).
pub fn normalize_longitude(lon: f64) -> f64 {
    (((lon % 360.0) + 540.0) % 360.0) - 180.0
}

/// Tracks an in-progress pointer drag.
///
/// Each move reports the delta from the previous pointer position, so the
/// camera follows the pointer incrementally.
#[derive(Debug, Default, Clone)]
pub struct DragTracker {
    last_pos: Option<(f64, f64)>,
}

impl DragTracker {
    /// Starts a drag at the given pointer position.
    pub fn begin(&mut self, x: f64, y: f64) {
        self.last_pos = Some((x, y));
    }

    /// Records a pointer move, returning the pixel delta since the last move.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (last_x, last_y) = self.last_pos?;
        self.last_pos = Some((x, y));
        Some((x - last_x, y - last_y))
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        self.last_pos = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_longitude() {
        assert!((normalize_longitude(0.0) - 0.0).abs() < 1e-9);
        assert!((normalize_longitude(190.0) - -170.0).abs() < 1e-9);
        assert!((normalize_longitude(-190.0) - 170.0).abs() < 1e-9);
        assert!((normalize_longitude(720.0) - 0.0).abs() < 1e-9);
        assert!((normalize_longitude(180.0) - -180.0).abs() < 1e-9);
        assert!((normalize_longitude(-180.0) - -180.0).abs() < 1e-9);
        assert!((normalize_longitude(-1085.5) - -5.5).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_longitude_range() {
        let mut lon = -5000.0;
        while lon < 5000.0 {
            let n = normalize_longitude(lon);
            assert!((-180.0..180.0).contains(&n), "{} -> {}", lon, n);
            lon += 37.3;
        }
    }

    #[test]
    fn test_step_directions() {
        let p = CameraPosition::new(10.0, 20.0);
        assert_eq!(p.stepped(Direction::Right, 5.0), CameraPosition::new(15.0, 20.0));
        assert_eq!(p.stepped(Direction::Left, 5.0), CameraPosition::new(5.0, 20.0));
        assert_eq!(p.stepped(Direction::Up, 10.0), CameraPosition::new(10.0, 30.0));
        assert_eq!(p.stepped(Direction::Down, 10.0), CameraPosition::new(10.0, 10.0));
    }

    #[test]
    fn test_step_is_unclamped() {
        let mut p = CameraPosition::new(0.0, 85.0);
        p = p.stepped(Direction::Up, 10.0);
        assert!((p.lat - 95.0).abs() < 1e-9);

        let mut p = CameraPosition::new(175.0, 0.0);
        p = p.stepped(Direction::Right, 10.0);
        assert!((p.lon - 185.0).abs() < 1e-9);
        assert!((p.normalized_lon() - -175.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_delta() {
        let p = CameraPosition::ORIGIN.dragged(40.0, -20.0, 0.25);
        assert!((p.lon - -10.0).abs() < 1e-9);
        assert!((p.lat - -5.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_tracker_incremental_deltas() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.update(5.0, 5.0), None);

        tracker.begin(100.0, 100.0);
        assert!(tracker.is_dragging());
        assert_eq!(tracker.update(110.0, 95.0), Some((10.0, -5.0)));
        assert_eq!(tracker.update(111.0, 95.0), Some((1.0, 0.0)));

        tracker.end();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.update(200.0, 200.0), None);
    }

    #[test]
    fn test_serde_as_array() {
        let p = CameraPosition::new(-12.5, 40.25);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[-12.5,40.25]");

        let parsed: CameraPosition = serde_json::from_str("[30,-15.5]").unwrap();
        assert_eq!(parsed, CameraPosition::new(30.0, -15.5));

        assert!(serde_json::from_str::<CameraPosition>("{\"lon\":1}").is_err());
    }

    #[test]
    fn test_display_label() {
        let p = CameraPosition::new(370.0, -12.346);
        assert_eq!(p.display_label(), "Your position: 10.00°, -12.35°");
    }
}
