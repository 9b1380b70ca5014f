//! Geographic layer data structures.

use super::topology::Topology;
use super::GeoLoadError;
use crate::state::ThemeDefinition;
use eframe::egui::{Color32, Stroke};
use geo_types::Coord;

/// Type of geographic layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoLayerType {
    /// Land masses, filled.
    Land,
    /// Country outlines, stroked only.
    Countries,
}

impl GeoLayerType {
    /// Name of the matching object in the world topology.
    pub fn object_name(&self) -> &'static str {
        match self {
            GeoLayerType::Land => "land",
            GeoLayerType::Countries => "countries",
        }
    }

    /// Returns the line width for this layer type.
    pub fn line_width(&self) -> f32 {
        match self {
            GeoLayerType::Land => 0.5,
            GeoLayerType::Countries => 0.25,
        }
    }

    /// Fill color under a theme, if the layer is filled.
    pub fn fill(&self, theme: &ThemeDefinition) -> Option<Color32> {
        match self {
            GeoLayerType::Land => Some(theme.land),
            GeoLayerType::Countries => None,
        }
    }

    /// Outline stroke under a theme.
    pub fn stroke(&self, theme: &ThemeDefinition) -> Stroke {
        let color = match self {
            GeoLayerType::Land => theme.land_stroke,
            GeoLayerType::Countries => theme.country_stroke,
        };
        Stroke::new(self.line_width(), color)
    }
}

/// An area feature in longitude/latitude degrees.
#[derive(Debug, Clone)]
pub enum GeoFeature {
    /// A closed polygon with optional label
    Polygon {
        exterior: Vec<Coord<f64>>,
        holes: Vec<Vec<Coord<f64>>>,
        label: Option<String>,
    },
    /// Multiple polygons with optional label
    MultiPolygon {
        polygons: Vec<(Vec<Coord<f64>>, Vec<Vec<Coord<f64>>>)>,
        label: Option<String>,
    },
}

impl GeoFeature {
    /// Iterates over `(exterior, holes)` pairs.
    pub fn polygons(&self) -> Box<dyn Iterator<Item = (&[Coord<f64>], &[Vec<Coord<f64>>])> + '_> {
        match self {
            GeoFeature::Polygon {
                exterior, holes, ..
            } => Box::new(std::iter::once((exterior.as_slice(), holes.as_slice()))),
            GeoFeature::MultiPolygon { polygons, .. } => Box::new(
                polygons
                    .iter()
                    .map(|(exterior, holes)| (exterior.as_slice(), holes.as_slice())),
            ),
        }
    }

    #[allow(dead_code)] // Kept for hover/tooltip use
    pub fn label(&self) -> Option<&str> {
        match self {
            GeoFeature::Polygon { label, .. } | GeoFeature::MultiPolygon { label, .. } => {
                label.as_deref()
            }
        }
    }

    /// Total number of positions across all rings.
    pub fn point_count(&self) -> usize {
        self.polygons()
            .map(|(exterior, holes)| exterior.len() + holes.iter().map(Vec::len).sum::<usize>())
            .sum()
    }
}

/// A geographic layer containing multiple features.
#[derive(Debug, Clone)]
pub struct GeoLayer {
    /// Type of this layer
    pub layer_type: GeoLayerType,
    /// Features in this layer
    pub features: Vec<GeoFeature>,
}

impl GeoLayer {
    /// Creates a new empty layer of the specified type.
    pub fn new(layer_type: GeoLayerType) -> Self {
        Self {
            layer_type,
            features: Vec::new(),
        }
    }

    /// Loads this layer's object out of a decoded topology.
    pub fn load_from_topology(&mut self, topology: &Topology) -> Result<(), GeoLoadError> {
        self.features = topology.features(self.layer_type.object_name())?;
        Ok(())
    }
}

/// The land and country collections drawn by the map.
#[derive(Debug, Clone)]
pub struct GeoLayerSet {
    pub land: GeoLayer,
    pub countries: GeoLayer,
}

impl GeoLayerSet {
    /// Decodes both collections from a TopoJSON document.
    pub fn from_topology_json(json: &str) -> Result<Self, GeoLoadError> {
        let topology = Topology::from_json(json)?;

        let mut land = GeoLayer::new(GeoLayerType::Land);
        land.load_from_topology(&topology)?;

        let mut countries = GeoLayer::new(GeoLayerType::Countries);
        countries.load_from_topology(&topology)?;

        Ok(Self { land, countries })
    }

    /// Layers in draw order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &GeoLayer> {
        [&self.land, &self.countries].into_iter()
    }
}
