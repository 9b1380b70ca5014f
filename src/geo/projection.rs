//! Map projection and coordinate transformation.
//!
//! Handles rotating the sphere so the camera sits at the projection center,
//! and converting rotated coordinates to screen positions for the Mercator
//! map and the orthographic globe.

use crate::state::CameraPosition;
use eframe::egui::{Pos2, Rect};
use geo_types::Coord;
use glam::{DMat3, DVec3};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Rotation of the sphere by yaw (λ), pitch (φ) and roll (γ), in degrees.
///
/// The yaw is applied as a longitude shift; pitch and roll rotate the sphere
/// about the y and x axes.
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
    delta_lambda: f64,
    matrix: Option<DMat3>,
}

impl Rotation {
    pub fn new(lambda_deg: f64, phi_deg: f64, gamma_deg: f64) -> Self {
        let delta_lambda = (lambda_deg % 360.0).to_radians();
        let (phi, gamma) = (phi_deg.to_radians(), gamma_deg.to_radians());

        let matrix = (phi != 0.0 || gamma != 0.0)
            .then(|| DMat3::from_rotation_x(gamma) * DMat3::from_rotation_y(-phi));

        Self {
            delta_lambda,
            matrix,
        }
    }

    /// Rotation that brings `position` to (0°, 0°).
    pub fn centering(position: CameraPosition) -> Self {
        Self::new(-position.lon, -position.lat, 0.0)
    }

    /// Rotates a (lon, lat) coordinate in degrees, returning radians with
    /// λ in [-π, π].
    pub fn apply(&self, coord: Coord<f64>) -> (f64, f64) {
        let lambda = wrap_pi(coord.x.to_radians() + self.delta_lambda);
        let phi = coord.y.to_radians();

        let Some(matrix) = self.matrix else {
            return (lambda, phi);
        };

        let cos_phi = phi.cos();
        let v = matrix
            * DVec3::new(lambda.cos() * cos_phi, lambda.sin() * cos_phi, phi.sin());
        (v.y.atan2(v.x), v.z.clamp(-1.0, 1.0).asin())
    }
}

/// Wraps an angle into [-π, π].
fn wrap_pi(angle: f64) -> f64 {
    if (-PI..=PI).contains(&angle) {
        angle
    } else {
        (angle + PI).rem_euclid(TAU) - PI
    }
}

/// Mercator projection fitted to a container.
#[derive(Debug, Clone)]
pub struct MercatorProjection {
    pub rotation: Rotation,
    /// Pixels per radian.
    pub scale: f64,
    /// Screen position of the projection center.
    pub center: Pos2,
}

impl MercatorProjection {
    /// Projection for a container: the whole world is `min(w, 2h)` wide and
    /// the camera position is at the center of `rect`.
    pub fn for_view(position: CameraPosition, rect: Rect) -> Self {
        let (w, h) = (rect.width() as f64, rect.height() as f64);
        Self {
            rotation: Rotation::centering(position),
            scale: w.min(h * 2.0) / TAU,
            center: rect.center(),
        }
    }

    /// Width of one copy of the world in pixels.
    pub fn world_width(&self) -> f64 {
        TAU * self.scale
    }

    /// Projects already-rotated coordinates (radians). `lambda` may lie
    /// outside [-π, π] for unwrapped rings. Latitudes are clipped to the
    /// square world extent (≈ ±85.05°).
    pub fn project_rotated(&self, lambda: f64, phi: f64) -> Pos2 {
        let phi = phi.clamp(-FRAC_PI_2, FRAC_PI_2);
        let y = ((FRAC_PI_2 + phi) / 2.0).tan().ln().clamp(-PI, PI);
        Pos2::new(
            (self.center.x as f64 + lambda * self.scale) as f32,
            (self.center.y as f64 - y * self.scale) as f32,
        )
    }

    /// Projects a (lon, lat) coordinate in degrees.
    pub fn project(&self, coord: Coord<f64>) -> Pos2 {
        let (lambda, phi) = self.rotation.apply(coord);
        self.project_rotated(lambda, phi)
    }
}

/// Orthographic projection of a sphere of `radius` pixels.
#[derive(Debug, Clone)]
pub struct OrthographicProjection {
    pub rotation: Rotation,
    pub radius: f64,
    pub center: Pos2,
}

impl OrthographicProjection {
    /// Globe for the camera position.
    ///
    /// Latitude tilts the same way as the map; longitude spins the globe the
    /// opposite way, so at camera longitude `lon` the meridian `-lon` faces
    /// the viewer.
    pub fn for_view(position: CameraPosition, center: Pos2, radius: f32) -> Self {
        Self {
            rotation: Rotation::new(position.lon, -position.lat, 0.0),
            radius: radius as f64,
            center,
        }
    }

    /// Projects a coordinate, returning `None` on the far hemisphere.
    pub fn project(&self, coord: Coord<f64>) -> Option<Pos2> {
        let (lambda, phi) = self.rotation.apply(coord);
        if lambda.cos() * phi.cos() < 0.0 {
            return None;
        }
        Some(Pos2::new(
            (self.center.x as f64 + self.radius * phi.cos() * lambda.sin()) as f32,
            (self.center.y as f64 - self.radius * phi.sin()) as f32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Vec2;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_rotation_brings_camera_to_origin() {
        let positions = [
            CameraPosition::new(0.0, 0.0),
            CameraPosition::new(45.0, 30.0),
            CameraPosition::new(-170.0, -60.0),
            CameraPosition::new(725.0, 10.0),
        ];
        for position in positions {
            let rotation = Rotation::centering(position);
            let (lambda, phi) = rotation.apply(Coord {
                x: position.lon,
                y: position.lat,
            });
            assert!(lambda.abs() < 1e-9, "{:?} -> {}", position, lambda);
            assert!(phi.abs() < 1e-9, "{:?} -> {}", position, phi);
        }
    }

    #[test]
    fn test_longitude_only_rotation() {
        let rotation = Rotation::new(-30.0, 0.0, 0.0);
        let (lambda, phi) = rotation.apply(Coord { x: 40.0, y: 12.0 });
        assert!(close(lambda, 10f64.to_radians()));
        assert!(close(phi, 12f64.to_radians()));

        // Wraps across the antimeridian.
        let (lambda, _) = rotation.apply(Coord { x: -170.0, y: 0.0 });
        assert!(close(lambda, 160f64.to_radians()));
    }

    #[test]
    fn test_pitch_moves_north() {
        // Looking at 30°N: a point at 30°N on the same meridian lands on the
        // equator, the north pole lands at 60°N.
        let rotation = Rotation::new(0.0, -30.0, 0.0);
        let (_, phi) = rotation.apply(Coord { x: 0.0, y: 90.0 });
        assert!(close(phi, 60f64.to_radians()));
        let (lambda, phi) = rotation.apply(Coord { x: 0.0, y: 0.0 });
        assert!(close(lambda, 0.0));
        assert!(close(phi, -30f64.to_radians()));
    }

    #[test]
    fn test_mercator_scale_and_center() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 400.0));
        let projection = MercatorProjection::for_view(CameraPosition::ORIGIN, rect);
        assert!(close(projection.scale, 800.0 / TAU));
        assert!((projection.world_width() - 800.0).abs() < 1e-6);

        let center = projection.project(Coord { x: 0.0, y: 0.0 });
        assert!((center.x - 500.0).abs() < 1e-3);
        assert!((center.y - 200.0).abs() < 1e-3);

        let east = projection.project(Coord { x: 90.0, y: 0.0 });
        assert!((east.x - 700.0).abs() < 1e-3);

        let north = projection.project(Coord { x: 0.0, y: 45.0 });
        let expected = 200.0 - (PI / 4.0 + PI / 8.0).tan().ln() * projection.scale;
        assert!((north.y as f64 - expected).abs() < 1e-3);
    }

    #[test]
    fn test_mercator_clips_poles() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(628.0, 628.0));
        let projection = MercatorProjection::for_view(CameraPosition::ORIGIN, rect);
        let pole = projection.project(Coord { x: 0.0, y: 90.0 });
        assert!(pole.y.is_finite());
        assert!((pole.y as f64 - (314.0 - PI * projection.scale)).abs() < 1e-3);
    }

    #[test]
    fn test_mercator_camera_is_centered() {
        let rect = Rect::from_min_size(Pos2::new(20.0, 20.0), Vec2::new(600.0, 300.0));
        let position = CameraPosition::new(-74.0, 40.7);
        let projection = MercatorProjection::for_view(position, rect);
        let p = projection.project(Coord { x: -74.0, y: 40.7 });
        assert!((p.x - rect.center().x).abs() < 1e-3);
        assert!((p.y - rect.center().y).abs() < 1e-3);
    }

    #[test]
    fn test_orthographic_hemispheres() {
        let center = Pos2::new(40.0, 40.0);
        let globe = OrthographicProjection::for_view(CameraPosition::new(20.0, 0.0), center, 38.0);

        let front = globe.project(Coord { x: -20.0, y: 0.0 }).unwrap();
        assert!((front.x - 40.0).abs() < 1e-4 && (front.y - 40.0).abs() < 1e-4);

        let limb = globe.project(Coord { x: 70.0, y: 0.0 }).unwrap();
        assert!((limb.x - 78.0).abs() < 1e-3);

        assert!(globe.project(Coord { x: 160.0, y: 0.0 }).is_none());

        let north = globe.project(Coord { x: -20.0, y: 90.0 }).unwrap();
        assert!((north.y - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_globe_spins_against_camera_longitude() {
        let center = Pos2::new(40.0, 40.0);
        let globe = OrthographicProjection::for_view(CameraPosition::new(90.0, 0.0), center, 38.0);

        let facing = globe.project(Coord { x: -90.0, y: 0.0 }).unwrap();
        assert!((facing.x - 40.0).abs() < 1e-4 && (facing.y - 40.0).abs() < 1e-4);
        assert!(globe.project(Coord { x: 90.0, y: 0.0 }).is_none());
    }

    #[test]
    fn test_globe_tilts_with_camera_latitude() {
        let center = Pos2::new(40.0, 40.0);
        let globe = OrthographicProjection::for_view(CameraPosition::new(0.0, 30.0), center, 38.0);

        let facing = globe.project(Coord { x: 0.0, y: 30.0 }).unwrap();
        assert!((facing.x - 40.0).abs() < 1e-4 && (facing.y - 40.0).abs() < 1e-4);
    }
}
