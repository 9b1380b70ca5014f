//! Geographic layer rendering.
//!
//! Builds the map as a list of egui shapes. Every pass rebuilds everything
//! from the layer data; nothing is cached between frames.
//!
//! Rings are rotated, then "unwrapped" so that consecutive points never jump
//! across the antimeridian. An unwrapped ring may extend past ±180°; drawing
//! three copies of the world one world-width apart fills in the other side
//! so horizontal panning looks continuous.

use super::graticule::{equator, graticule_lines, prime_meridian};
use super::{GeoLayer, GeoLayerSet, MercatorProjection, OrthographicProjection, Rotation};
use crate::state::{CameraPosition, ThemeDefinition};
use eframe::egui::{Color32, Mesh, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use geo_types::Coord;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// World copies, in world widths: -360°, 0°, +360°.
const WORLD_COPIES: [f32; 3] = [-1.0, 0.0, 1.0];

/// Marker color for the globe's center point.
const GLOBE_MARKER: Color32 = Color32::RED;

/// Renders the map into `rect`.
///
/// A zero-size container draws nothing.
pub fn render_map(
    painter: &Painter,
    rect: Rect,
    layers: Option<&GeoLayerSet>,
    position: CameraPosition,
    theme: &ThemeDefinition,
) {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return;
    }
    let painter = painter.with_clip_rect(rect);
    painter.extend(map_shapes(rect, layers, position, theme));
}

/// Builds all shapes for one map pass: background, then graticule, land and
/// country outlines for each world copy.
pub fn map_shapes(
    rect: Rect,
    layers: Option<&GeoLayerSet>,
    position: CameraPosition,
    theme: &ThemeDefinition,
) -> Vec<Shape> {
    let projection = MercatorProjection::for_view(position, rect);
    let world_width = projection.world_width() as f32;
    let mut shapes = vec![Shape::rect_filled(rect, 0.0, theme.background)];

    let graticule_stroke = Stroke::new(0.5, theme.graticule);
    for line in graticule_lines() {
        for run in split_at_antimeridian(&rotate_all(&line, &projection.rotation)) {
            let points: Vec<Pos2> = run
                .iter()
                .map(|&(lambda, phi)| projection.project_rotated(lambda, phi))
                .collect();
            let bounds = Rect::from_points(&points);
            for copy in WORLD_COPIES {
                let offset = Vec2::new(copy * world_width, 0.0);
                if !bounds.translate(offset).intersects(rect) {
                    continue;
                }
                let shifted: Vec<Pos2> = points.iter().map(|p| *p + offset).collect();
                shapes.extend(Shape::dashed_line(&shifted, graticule_stroke, 2.0, 2.0));
            }
        }
    }

    let Some(layers) = layers else {
        return shapes;
    };

    for copy in WORLD_COPIES {
        let offset = Vec2::new(copy * world_width, 0.0);
        for layer in layers.iter() {
            layer_shapes(&mut shapes, layer, &projection, theme, offset, rect);
        }
    }

    shapes
}

fn layer_shapes(
    shapes: &mut Vec<Shape>,
    layer: &GeoLayer,
    projection: &MercatorProjection,
    theme: &ThemeDefinition,
    offset: Vec2,
    clip: Rect,
) {
    let fill = layer.layer_type.fill(theme);
    let stroke = layer.layer_type.stroke(theme);
    let first_outline = shapes.len();
    let mut mesh = Mesh::default();

    for feature in &layer.features {
        for (exterior, holes) in feature.polygons() {
            let rings: Vec<Vec<Pos2>> = std::iter::once(exterior)
                .chain(holes.iter().map(Vec::as_slice))
                .map(|ring| project_ring(ring, projection))
                .filter(|ring| ring.len() >= 2)
                .collect();

            let Some(outer) = rings.first() else {
                continue;
            };
            if !Rect::from_points(outer).translate(offset).intersects(clip) {
                continue;
            }

            if let Some(color) = fill {
                let filled: Vec<Vec<Pos2>> = std::iter::once(exterior)
                    .chain(holes.iter().map(Vec::as_slice))
                    .map(|ring| close_ring_at_pole(ring, projection))
                    .collect();
                append_polygon(&mut mesh, &filled, offset, color);
            }

            for ring in &rings {
                let points = ring.iter().map(|p| *p + offset).collect();
                shapes.push(Shape::line(points, stroke));
            }
        }
    }

    if !mesh.is_empty() {
        // Fill goes underneath this layer's outlines.
        shapes.insert(first_outline, Shape::mesh(mesh));
    }
}

fn rotate_all(coords: &[Coord<f64>], rotation: &Rotation) -> Vec<(f64, f64)> {
    coords.iter().map(|c| rotation.apply(*c)).collect()
}

/// Rotates a ring and removes antimeridian jumps, so longitudes change by at
/// most π between neighbours.
pub fn unwrap_ring(coords: &[Coord<f64>], rotation: &Rotation) -> Vec<(f64, f64)> {
    let mut out: Vec<(f64, f64)> = Vec::with_capacity(coords.len());
    let mut shift = 0.0;
    let mut prev: Option<f64> = None;

    for &(lambda, phi) in &rotate_all(coords, rotation) {
        if let Some(p) = prev {
            let delta = lambda - p;
            if delta > PI {
                shift -= TAU;
            } else if delta < -PI {
                shift += TAU;
            }
        }
        prev = Some(lambda);
        out.push((lambda + shift, phi));
    }

    out
}

/// Net number of times an unwrapped closed ring goes around the pole.
pub fn ring_winding(unwrapped: &[(f64, f64)]) -> i32 {
    match (unwrapped.first(), unwrapped.last()) {
        (Some(first), Some(last)) => ((last.0 - first.0) / TAU).round() as i32,
        _ => 0,
    }
}

/// For rings that encircle a pole, adds two vertices along the map's top or
/// bottom edge so the filled area covers the polar cap.
pub fn close_polar(unwrapped: &mut Vec<(f64, f64)>) {
    if ring_winding(unwrapped) == 0 {
        return;
    }
    let (Some(&first), Some(&last)) = (unwrapped.first(), unwrapped.last()) else {
        return;
    };

    let mean_phi = unwrapped.iter().map(|p| p.1).sum::<f64>() / unwrapped.len() as f64;
    let pole = if mean_phi < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 };

    unwrapped.push((last.0, pole));
    unwrapped.push((first.0, pole));
}

fn project_ring(ring: &[Coord<f64>], projection: &MercatorProjection) -> Vec<Pos2> {
    unwrap_ring(ring, &projection.rotation)
        .into_iter()
        .map(|(lambda, phi)| projection.project_rotated(lambda, phi))
        .collect()
}

fn close_ring_at_pole(ring: &[Coord<f64>], projection: &MercatorProjection) -> Vec<Pos2> {
    let mut unwrapped = unwrap_ring(ring, &projection.rotation);
    close_polar(&mut unwrapped);
    unwrapped
        .into_iter()
        .map(|(lambda, phi)| projection.project_rotated(lambda, phi))
        .collect()
}

/// Splits a rotated line wherever it crosses the antimeridian.
pub fn split_at_antimeridian(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for &point in points {
        if let Some(&(prev_lambda, _)) = current.last() {
            if (point.0 - prev_lambda).abs() > PI {
                runs.push(std::mem::take(&mut current));
            }
        }
        current.push(point);
    }
    runs.push(current);

    runs.retain(|run| run.len() >= 2);
    runs
}

/// Triangulates a polygon (outer ring first, then holes) into index triples.
pub fn tessellate(rings: &[Vec<Pos2>]) -> Vec<u32> {
    let mut coords: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();

    for (i, ring) in rings.iter().enumerate() {
        let points = without_closing_duplicate(ring);
        if points.len() < 3 {
            if i == 0 {
                return Vec::new();
            }
            continue;
        }
        if i > 0 {
            hole_indices.push(coords.len() / 2);
        }
        for p in points {
            coords.push(p.x as f64);
            coords.push(p.y as f64);
        }
    }

    match earcutr::earcut(&coords, &hole_indices, 2) {
        Ok(indices) => indices.into_iter().map(|i| i as u32).collect(),
        Err(e) => {
            log::debug!("Tessellation failed: {:?}", e);
            Vec::new()
        }
    }
}

fn without_closing_duplicate(ring: &[Pos2]) -> &[Pos2] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Adds a filled polygon to `mesh`, translated by `offset`.
fn append_polygon(mesh: &mut Mesh, rings: &[Vec<Pos2>], offset: Vec2, color: Color32) {
    let indices = tessellate(rings);
    if indices.is_empty() {
        return;
    }

    let base = mesh.vertices.len() as u32;
    for ring in rings {
        let points = without_closing_duplicate(ring);
        if points.len() < 3 {
            continue;
        }
        for p in points {
            mesh.colored_vertex(*p + offset, color);
        }
    }
    for triangle in indices.chunks_exact(3) {
        mesh.add_triangle(base + triangle[0], base + triangle[1], base + triangle[2]);
    }
}

/// Renders the orthographic globe indicator centered in `rect`.
pub fn render_globe(
    painter: &Painter,
    rect: Rect,
    position: CameraPosition,
    theme: &ThemeDefinition,
) {
    painter.extend(globe_shapes(rect, position, theme));
}

/// Builds the globe indicator: disc, graticule, equator, prime meridian and
/// a fixed center marker.
pub fn globe_shapes(rect: Rect, position: CameraPosition, theme: &ThemeDefinition) -> Vec<Shape> {
    let center = rect.center();
    let radius = rect.width().min(rect.height()) / 2.0 - 2.0;
    if radius <= 0.0 {
        return Vec::new();
    }
    let projection = OrthographicProjection::for_view(position, center, radius);
    let outline = Stroke::new(0.5, theme.land_stroke);

    let mut shapes = vec![Shape::circle_filled(center, radius, theme.background)];
    shapes.push(Shape::circle_stroke(center, radius, outline));

    let graticule_stroke = Stroke::new(0.5, theme.graticule);
    for line in graticule_lines() {
        for run in visible_runs(&line, &projection) {
            shapes.extend(Shape::dashed_line(&run, graticule_stroke, 1.0, 1.0));
        }
    }

    for line in [equator(), prime_meridian()] {
        for run in visible_runs(&line, &projection) {
            shapes.push(Shape::line(run, outline));
        }
    }

    shapes.push(Shape::circle_filled(center, 2.0, GLOBE_MARKER));
    shapes
}

/// Splits a line into runs that lie on the visible hemisphere.
fn visible_runs(line: &[Coord<f64>], projection: &OrthographicProjection) -> Vec<Vec<Pos2>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for coord in line {
        match projection.project(*coord) {
            Some(p) => current.push(p),
            None => {
                if current.len() >= 2 {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }

    runs
}
