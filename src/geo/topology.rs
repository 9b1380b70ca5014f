//! TopoJSON decoding.
//!
//! A topology stores each shared boundary once as an "arc"; polygons refer to
//! arcs by index (negative indices, as `!i`, mean the arc is traversed in
//! reverse). Quantized topologies delta-encode arc positions and carry a
//! transform back to longitude/latitude.

use super::layer::GeoFeature;
use super::GeoLoadError;
use geo_types::Coord;
use serde::Deserialize;
use std::collections::HashMap;

/// A parsed TopoJSON document.
#[derive(Debug, Deserialize)]
pub struct Topology {
    pub objects: HashMap<String, TopoGeometry>,
    pub arcs: Vec<Vec<Vec<f64>>>,
    #[serde(default)]
    pub transform: Option<Transform>,
}

/// Quantization transform.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

/// Geometry objects. Only area and collection types are decoded into
/// features; line and point objects are accepted but skipped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum TopoGeometry {
    GeometryCollection {
        geometries: Vec<TopoGeometry>,
    },
    Polygon {
        arcs: Vec<Vec<i64>>,
        #[serde(default)]
        properties: Option<serde_json::Map<String, serde_json::Value>>,
    },
    MultiPolygon {
        arcs: Vec<Vec<Vec<i64>>>,
        #[serde(default)]
        properties: Option<serde_json::Map<String, serde_json::Value>>,
    },
    LineString {
        arcs: Vec<i64>,
    },
    MultiLineString {
        arcs: Vec<Vec<i64>>,
    },
    Point {
        coordinates: Vec<f64>,
    },
    MultiPoint {
        coordinates: Vec<Vec<f64>>,
    },
}

impl Topology {
    pub fn from_json(json: &str) -> Result<Self, GeoLoadError> {
        serde_json::from_str(json).map_err(|e| GeoLoadError::Parse(e.to_string()))
    }

    /// Decodes the named object into features, one per polygonal geometry.
    pub fn features(&self, object: &str) -> Result<Vec<GeoFeature>, GeoLoadError> {
        let geometry = self
            .objects
            .get(object)
            .ok_or_else(|| GeoLoadError::MissingObject(object.to_string()))?;

        let arcs = self.decode_arcs();
        let mut features = Vec::new();
        collect_features(geometry, &arcs, &mut features)?;
        Ok(features)
    }

    /// Converts every arc to absolute longitude/latitude.
    fn decode_arcs(&self) -> Vec<Vec<Coord<f64>>> {
        self.arcs
            .iter()
            .map(|arc| {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| match self.transform {
                        Some(t) => {
                            x += p[0];
                            y += p[1];
                            Coord {
                                x: x * t.scale[0] + t.translate[0],
                                y: y * t.scale[1] + t.translate[1],
                            }
                        }
                        None => Coord { x: p[0], y: p[1] },
                    })
                    .collect()
            })
            .collect()
    }
}

fn collect_features(
    geometry: &TopoGeometry,
    arcs: &[Vec<Coord<f64>>],
    out: &mut Vec<GeoFeature>,
) -> Result<(), GeoLoadError> {
    match geometry {
        TopoGeometry::GeometryCollection { geometries } => {
            for g in geometries {
                collect_features(g, arcs, out)?;
            }
        }
        TopoGeometry::Polygon {
            arcs: rings,
            properties,
        } => {
            if let Some((exterior, holes)) = polygon(rings, arcs)? {
                out.push(GeoFeature::Polygon {
                    exterior,
                    holes,
                    label: feature_name(properties.as_ref()),
                });
            }
        }
        TopoGeometry::MultiPolygon {
            arcs: polygons,
            properties,
        } => {
            let mut decoded = Vec::with_capacity(polygons.len());
            for rings in polygons {
                if let Some(p) = polygon(rings, arcs)? {
                    decoded.push(p);
                }
            }
            if !decoded.is_empty() {
                out.push(GeoFeature::MultiPolygon {
                    polygons: decoded,
                    label: feature_name(properties.as_ref()),
                });
            }
        }
        TopoGeometry::LineString { .. }
        | TopoGeometry::MultiLineString { .. }
        | TopoGeometry::Point { .. }
        | TopoGeometry::MultiPoint { .. } => {
            log::debug!("Skipping non-polygonal topology geometry");
        }
    }
    Ok(())
}

type Polygon = (Vec<Coord<f64>>, Vec<Vec<Coord<f64>>>);

fn polygon(rings: &[Vec<i64>], arcs: &[Vec<Coord<f64>>]) -> Result<Option<Polygon>, GeoLoadError> {
    let mut decoded = rings
        .iter()
        .map(|r| ring(r, arcs))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|r| !r.is_empty());

    Ok(decoded.next().map(|exterior| (exterior, decoded.collect())))
}

/// Stitches a ring from arc references. Consecutive arcs share an endpoint,
/// which is kept only once.
fn ring(refs: &[i64], arcs: &[Vec<Coord<f64>>]) -> Result<Vec<Coord<f64>>, GeoLoadError> {
    let mut points: Vec<Coord<f64>> = Vec::new();

    for &i in refs {
        let (index, reversed) = if i < 0 { (!i, true) } else { (i, false) };
        let arc = usize::try_from(index)
            .ok()
            .and_then(|idx| arcs.get(idx))
            .ok_or(GeoLoadError::InvalidArc(i))?;

        points.pop();
        if reversed {
            points.extend(arc.iter().rev());
        } else {
            points.extend(arc.iter());
        }
    }

    // Degenerate rings are padded to a closed ring of four positions.
    if let Some(&first) = points.first() {
        while points.len() < 4 {
            points.push(first);
        }
    }

    Ok(points)
}

fn feature_name(properties: Option<&serde_json::Map<String, serde_json::Value>>) -> Option<String> {
    properties
        .and_then(|p| p.get("name").or_else(|| p.get("NAME")))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
