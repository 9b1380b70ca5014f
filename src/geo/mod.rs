//! World geography: topology decoding, projections and map rendering.
//!
//! The world atlas is fetched once at startup; land and country collections
//! are then re-projected and redrawn on every frame.

mod graticule;
mod layer;
mod loader;
mod projection;
mod renderer;
mod topology;

pub use layer::{GeoLayer, GeoLayerSet};
pub use loader::GeoLoadChannel;
pub use projection::{MercatorProjection, OrthographicProjection, Rotation};
pub use renderer::{render_globe, render_map};

use std::fmt;

/// Errors that can occur while fetching or decoding the world atlas.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoLoadError {
    /// The request could not be sent or the connection failed.
    Request(String),
    /// The server answered with a non-success status.
    Http(u16),
    /// The response body could not be read.
    Body(String),
    /// The body is not a valid topology.
    Parse(String),
    /// A required object is missing from the topology.
    MissingObject(String),
    /// A geometry refers to an arc that does not exist.
    InvalidArc(i64),
}

impl fmt::Display for GeoLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoLoadError::Request(msg) => write!(f, "Request failed: {}", msg),
            GeoLoadError::Http(status) => write!(f, "HTTP {}", status),
            GeoLoadError::Body(msg) => write!(f, "Failed to read response: {}", msg),
            GeoLoadError::Parse(msg) => write!(f, "Invalid topology: {}", msg),
            GeoLoadError::MissingObject(name) => write!(f, "Topology has no '{}' object", name),
            GeoLoadError::InvalidArc(index) => write!(f, "Invalid arc reference {}", index),
        }
    }
}

impl std::error::Error for GeoLoadError {}
